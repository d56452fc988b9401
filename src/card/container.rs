//! The card itself: ordered cells, layout and the tap shadow pulse.

use std::rc::Rc;
use std::time::Duration;

use tracing::debug;

use super::{Cell, CardContext, CellId};
use crate::config::CardMetrics;
use crate::geometry::{Point, Rect};
use crate::models::{Appearance, CellKind, RippleLocation};
use crate::ripple::{Action, RippleConfig, RippleEffect, TapBinding, TriggerHook};
use crate::scene::{
    AnimationGroup, Animator, Property, PropertyAnimation, Scene, Shadow, SurfaceId, TimingFunction,
};
use crate::text::{MonospaceMeasure, TextMeasure};
use crate::theme::Rgba;

pub const SHADOW_ANIMATION_KEY: &str = "shadowAnimation";

/// A vertical stack of cells inside a rounded, clipped content surface.
///
/// The card surface carries the shadow; the content surface (its only
/// child) carries the background and clips the cells. Every structural
/// mutation relayouts, so after any call:
///
/// * `height()` is the sum of the cell heights,
/// * each cell sits at the sum of the heights above it,
/// * every cell except the last has a bottom divider.
pub struct Card {
    surface: SurfaceId,
    content: SurfaceId,
    width: f32,
    height: f32,
    background: Option<Rgba>,
    appearance: Rc<Appearance>,
    metrics: CardMetrics,
    measure: Rc<dyn TextMeasure>,
    items: Vec<Cell>,
}

impl Card {
    /// Card at `frame` (its height is ignored and starts at zero) using the
    /// point-based metrics. Without an appearance the built-in one is used.
    pub fn new(scene: &mut Scene, frame: Rect, appearance: Option<Rc<Appearance>>) -> Self {
        Self::with_parts(
            scene,
            frame,
            appearance,
            CardMetrics::default(),
            Rc::new(MonospaceMeasure::proportional()),
        )
    }

    pub fn with_parts(
        scene: &mut Scene,
        frame: Rect,
        appearance: Option<Rc<Appearance>>,
        metrics: CardMetrics,
        measure: Rc<dyn TextMeasure>,
    ) -> Self {
        let surface = scene.create(Rect::new(frame.x, frame.y, frame.width, 0.0));
        let content = scene.create(Rect::new(0.0, 0.0, frame.width, 0.0));
        scene.add_child(surface, content);
        debug!(card = surface.raw(), width = frame.width, "card created");

        Self {
            surface,
            content,
            width: frame.width,
            height: 0.0,
            background: None,
            appearance: appearance.unwrap_or_default(),
            metrics,
            measure,
            items: Vec::new(),
        }
    }

    pub fn surface(&self) -> SurfaceId {
        self.surface
    }

    /// Surface holding the cells
    pub fn content(&self) -> SurfaceId {
        self.content
    }

    pub fn width(&self) -> f32 {
        self.width
    }

    pub fn height(&self) -> f32 {
        self.height
    }

    pub fn background(&self) -> Option<Rgba> {
        self.background
    }

    pub fn appearance(&self) -> &Rc<Appearance> {
        &self.appearance
    }

    pub fn metrics(&self) -> &CardMetrics {
        &self.metrics
    }

    pub fn items(&self) -> &[Cell] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn position(&self, id: CellId) -> Option<usize> {
        self.items.iter().position(|cell| cell.id() == id)
    }

    /// Read-only view handed to cells
    pub fn context(&self) -> CardContext<'_> {
        CardContext {
            appearance: &self.appearance,
            metrics: &self.metrics,
            measure: self.measure.as_ref(),
            width: self.width,
        }
    }

    pub fn set_origin(&self, scene: &mut Scene, origin: Point) {
        let frame = scene.frame(self.surface);
        scene.set_frame(self.surface, Rect::new(origin.x, origin.y, frame.width, frame.height));
    }

    /// Title header at the top of the card
    pub fn add_header(&mut self, scene: &mut Scene, title: &str) -> CellId {
        let ctx = self.context();
        let mut cell = Cell::new(scene, &ctx, CellKind::Header);
        cell.add_title(scene, &ctx, title);
        cell.clamp_height(scene, ctx.metrics.min_header_height);
        self.attach(scene, 0, cell)
    }

    pub fn add_header_view(&mut self, scene: &mut Scene, view: SurfaceId) -> CellId {
        let mut cell = Cell::new(scene, &self.context(), CellKind::Header);
        cell.add_view(scene, view);
        self.attach(scene, 0, cell)
    }

    /// Title footer at the bottom of the card
    pub fn add_footer(&mut self, scene: &mut Scene, title: &str) -> CellId {
        let ctx = self.context();
        let mut cell = Cell::new(scene, &ctx, CellKind::Footer);
        cell.add_title(scene, &ctx, title);
        cell.clamp_height(scene, ctx.metrics.min_header_height);
        self.attach(scene, self.items.len(), cell)
    }

    pub fn add_footer_view(&mut self, scene: &mut Scene, view: SurfaceId) -> CellId {
        let mut cell = Cell::new(scene, &self.context(), CellKind::Footer);
        cell.add_view(scene, view);
        self.attach(scene, self.items.len(), cell)
    }

    /// Text row; with `on_tap` the row ripples and runs it once settled.
    pub fn add_cell(&mut self, scene: &mut Scene, text: &str, on_tap: Option<Action>) -> CellId {
        let ctx = self.context();
        let mut cell = Cell::new(scene, &ctx, CellKind::Body);
        cell.add_text(scene, &ctx, text);
        cell.clamp_height(scene, ctx.metrics.min_row_height);
        self.bind_cell_tap(scene, &cell, on_tap);
        self.attach(scene, self.items.len(), cell)
    }

    pub fn add_cell_view(
        &mut self,
        scene: &mut Scene,
        view: SurfaceId,
        on_tap: Option<Action>,
    ) -> CellId {
        let mut cell = Cell::new(scene, &self.context(), CellKind::Body);
        cell.add_view(scene, view);
        self.bind_cell_tap(scene, &cell, on_tap);
        self.attach(scene, self.items.len(), cell)
    }

    /// Blank cell for callers that build their own content before
    /// [`Card::add_existing_cell`]
    pub fn new_cell(&self, scene: &mut Scene) -> Cell {
        Cell::new(scene, &self.context(), CellKind::Body)
    }

    /// Append a caller-built cell, restyled as a body cell
    pub fn add_existing_cell(&mut self, scene: &mut Scene, mut cell: Cell) -> CellId {
        cell.restyle(scene, CellKind::Body, self.appearance.cell_background);
        self.attach(scene, self.items.len(), cell)
    }

    /// Returns `false` and changes nothing when `index` is out of range
    pub fn remove_cell_at(&mut self, scene: &mut Scene, index: usize) -> bool {
        if index >= self.items.len() {
            debug!(card = self.surface.raw(), index, "remove out of range ignored");
            return false;
        }
        let cell = self.items.remove(index);
        scene.destroy(cell.surface());
        debug!(card = self.surface.raw(), index, "cell removed");
        self.layout(scene);
        true
    }

    /// Returns `false` and changes nothing when the cell is not in this card
    pub fn remove_cell(&mut self, scene: &mut Scene, id: CellId) -> bool {
        match self.position(id) {
            Some(index) => self.remove_cell_at(scene, index),
            None => false,
        }
    }

    /// Restack every cell, fix up dividers and resize the card to fit.
    pub fn layout(&mut self, scene: &mut Scene) {
        let ctx = CardContext {
            appearance: &self.appearance,
            metrics: &self.metrics,
            measure: self.measure.as_ref(),
            width: self.width,
        };
        let last = self.items.len().saturating_sub(1);
        let mut offset = 0.0;
        for (index, cell) in self.items.iter_mut().enumerate() {
            cell.set_offset(scene, offset);
            offset += cell.height();
            if index < last {
                cell.ensure_bottom_divider(scene, &ctx);
            } else {
                cell.remove_bottom_divider(scene);
            }
        }

        self.height = offset;
        scene.set_height(self.surface, offset);
        scene.set_frame(self.content, Rect::new(0.0, 0.0, self.width, offset));
        debug!(
            card = self.surface.raw(),
            cells = self.items.len(),
            height = offset,
            "card layout"
        );
        self.materialize(scene);
    }

    /// Apply background, corner rounding and shadow. Safe to repeat.
    pub fn materialize(&self, scene: &mut Scene) {
        scene.set_background(self.content, self.background);
        if let Some(layer) = scene.layer_mut(self.content) {
            layer.corner_radius = self.metrics.corner_radius;
            layer.clips = true;
        }
        if let Some(layer) = scene.layer_mut(self.surface) {
            layer.shadow = Some(Shadow {
                offset: self.metrics.shadow_offset,
                radius: self.metrics.shadow_radius,
                color: self.appearance.shadow_color,
                opacity: self.metrics.shadow_opacity,
                path_corner_radius: Some(self.metrics.corner_radius),
            });
        }
    }

    pub fn set_background(&mut self, scene: &mut Scene, color: Option<Rgba>) {
        self.background = color;
        self.materialize(scene);
    }

    /// Make the whole card tappable: a ripple on the content surface plus a
    /// shadow pulse on the card. `on_complete` runs when the ripple settles.
    pub fn add_ripple(&self, scene: &mut Scene, on_complete: Option<Action>) {
        let effect = RippleEffect::new(
            RippleConfig {
                color: self.appearance.ripple_color,
                duration: self.appearance.ripple_duration,
                location: RippleLocation::TouchLocation,
                with_overlay: false,
            },
            on_complete,
        );
        let card = self.surface;
        let peak = self.metrics.pulse_radius;
        let duration = self.appearance.ripple_duration;
        let hook: TriggerHook = Rc::new(move |scene: &mut Scene, animator: &mut Animator| {
            pulse_shadow(scene, animator, card, peak, duration);
        });
        scene.bind_tap(self.content, TapBinding::new(effect).with_hook(hook));
    }

    /// Remove the card and everything in it from the scene
    pub fn destroy(self, scene: &mut Scene) {
        debug!(card = self.surface.raw(), "card destroyed");
        scene.destroy(self.surface);
    }

    fn bind_cell_tap(&self, scene: &mut Scene, cell: &Cell, on_tap: Option<Action>) {
        let Some(action) = on_tap else {
            return;
        };
        let effect = RippleEffect::new(
            RippleConfig {
                color: self.appearance.ripple_color,
                duration: self.appearance.ripple_duration,
                location: RippleLocation::TouchLocation,
                with_overlay: true,
            },
            Some(action),
        );
        scene.bind_tap(cell.surface(), TapBinding::new(effect));
    }

    fn attach(&mut self, scene: &mut Scene, index: usize, cell: Cell) -> CellId {
        let id = cell.id();
        scene.add_child(self.content, cell.surface());
        debug!(
            card = self.surface.raw(),
            index,
            kind = cell.kind().label(),
            height = cell.height(),
            "cell added"
        );
        self.items.insert(index, cell);
        self.layout(scene);
        id
    }
}

/// Swell the card's shadow out and back over twice the ripple duration
fn pulse_shadow(
    scene: &mut Scene,
    animator: &mut Animator,
    card: SurfaceId,
    peak: f32,
    duration: Duration,
) {
    let Some(shadow) = scene.layer(card).and_then(|layer| layer.shadow) else {
        debug!(card = card.raw(), "no shadow to pulse");
        return;
    };
    let pulse = AnimationGroup::new(card, SHADOW_ANIMATION_KEY, duration * 2)
        .with_timing(TimingFunction::SwiftEnterInOut)
        .with_animation(
            PropertyAnimation::new(Property::ShadowRadius, shadow.radius, peak)
                .with_duration(duration)
                .autoreversed(),
        )
        .with_animation(
            PropertyAnimation::new(
                Property::ShadowOffsetY,
                shadow.offset.y,
                shadow.offset.y + peak,
            )
            .with_duration(duration)
            .autoreversed(),
        );
    animator.add(scene, pulse, None);
}

#[cfg(test)]
mod tests {
    use std::cell::Cell as Counter;

    use proptest::prelude::*;

    use super::*;
    use crate::scene::{Layer, Stage};

    fn card(scene: &mut Scene) -> Card {
        Card::with_parts(
            scene,
            Rect::new(0.0, 0.0, 300.0, 500.0),
            None,
            CardMetrics::default(),
            Rc::new(MonospaceMeasure::cells()),
        )
    }

    fn dividers(card: &Card) -> Vec<bool> {
        card.items().iter().map(Cell::has_bottom_divider).collect()
    }

    fn sum_heights(card: &Card) -> f32 {
        card.items().iter().map(Cell::height).sum()
    }

    fn counting_action() -> (Action, Rc<Counter<usize>>) {
        let calls = Rc::new(Counter::new(0));
        let counter = Rc::clone(&calls);
        let action: Action = Rc::new(move || counter.set(counter.get() + 1));
        (action, calls)
    }

    #[test]
    fn test_new_card_starts_empty_with_zero_height() {
        let mut scene = Scene::new();
        let card = card(&mut scene);
        assert!(card.is_empty());
        assert_eq!(card.height(), 0.0);
        assert_eq!(scene.frame(card.surface()).height, 0.0);
        assert_eq!(scene.children(card.surface()), &[card.content()]);
        assert_eq!(**card.appearance(), Appearance::default());
    }

    #[test]
    fn test_two_cells() {
        let mut scene = Scene::new();
        let mut card = card(&mut scene);
        card.add_cell(&mut scene, "Item 1", None);
        card.add_cell(&mut scene, "Item 2", None);

        assert_eq!(card.len(), 2);
        assert_eq!(dividers(&card), vec![true, false]);
        assert_eq!(card.height(), card.items()[0].height() + card.items()[1].height());
        // one line of text plus padding is below the minimum row height
        assert_eq!(card.items()[0].height(), 53.0);
        assert_eq!(card.items()[1].offset(), 53.0);
        assert_eq!(scene.frame(card.surface()).height, 106.0);
        assert_eq!(scene.frame(card.content()), Rect::new(0.0, 0.0, 300.0, 106.0));
    }

    #[test]
    fn test_header_goes_first() {
        let mut scene = Scene::new();
        let mut card = card(&mut scene);
        let first = card.add_cell(&mut scene, "Item 1", None);
        card.add_cell(&mut scene, "Item 2", None);
        let before = card.height();

        let header = card.add_header(&mut scene, "Header");
        assert_eq!(card.items()[0].id(), header);
        assert_eq!(card.items()[0].kind(), CellKind::Header);
        assert_eq!(card.position(first), Some(1));
        assert!(card.items()[1].has_bottom_divider());
        assert_eq!(card.height(), before + card.items()[0].height());
        assert_eq!(card.items()[0].height(), 40.0);
        assert_eq!(card.items()[1].offset(), 40.0);
    }

    #[test]
    fn test_empty_view_cell_divider_stays_inside_cell() {
        let mut scene = Scene::new();
        let mut card = card(&mut scene);
        let empty = scene.create(Rect::new(0.0, 0.0, 300.0, 0.0));
        card.add_cell_view(&mut scene, empty, None);
        card.add_cell(&mut scene, "next", None);

        let first = &card.items()[0];
        assert_eq!(first.height(), 0.0);
        assert_eq!(dividers(&card), vec![true, false]);
        let divider = first.divider().unwrap();
        assert_eq!(scene.frame(divider), Rect::new(0.0, 0.0, 300.0, 0.0));
        assert_eq!(card.items()[1].offset(), 0.0);
        assert_eq!(card.height(), card.items()[1].height());
    }

    #[test]
    fn test_header_gives_only_cell_a_divider() {
        let mut scene = Scene::new();
        let mut card = card(&mut scene);
        card.add_cell(&mut scene, "Only", None);
        assert_eq!(dividers(&card), vec![false]);
        card.add_header(&mut scene, "Header");
        assert_eq!(dividers(&card), vec![true, true]);
    }

    #[test]
    fn test_footer_goes_last_and_drops_previous_divider_rule() {
        let mut scene = Scene::new();
        let mut card = card(&mut scene);
        card.add_cell(&mut scene, "Item", None);
        let footer = card.add_footer(&mut scene, "Footer");

        assert_eq!(card.items()[1].id(), footer);
        assert_eq!(card.items()[1].kind(), CellKind::Footer);
        assert_eq!(card.items()[1].background(), card.appearance().header_background);
        assert_eq!(dividers(&card), vec![true, false]);
    }

    #[test]
    fn test_view_cells_take_view_height() {
        let mut scene = Scene::new();
        let mut card = card(&mut scene);
        let banner = scene.create(Rect::new(0.0, 0.0, 300.0, 10.0));
        let row = scene.create(Rect::new(0.0, 0.0, 300.0, 20.0));
        card.add_header_view(&mut scene, banner);
        card.add_cell_view(&mut scene, row, None);
        assert_eq!(card.items()[0].height(), 10.0);
        assert_eq!(card.items()[1].height(), 20.0);
        assert_eq!(card.height(), 30.0);
    }

    #[test]
    fn test_existing_cell_is_restyled_and_appended() {
        let mut scene = Scene::new();
        let mut card = card(&mut scene);
        card.add_header(&mut scene, "Header");

        let mut cell = Cell::new(&mut scene, &card.context(), CellKind::Header);
        cell.add_text(&mut scene, &card.context(), "custom");
        let id = card.add_existing_cell(&mut scene, cell);

        let cell = &card.items()[1];
        assert_eq!(cell.id(), id);
        assert_eq!(cell.kind(), CellKind::Body);
        assert_eq!(cell.background(), card.appearance().cell_background);
        assert_eq!(
            scene.layer(cell.surface()).unwrap().background,
            Some(card.appearance().cell_background)
        );
        // caller-built cells are not clamped
        assert_eq!(cell.height(), 33.0);
    }

    #[test]
    fn test_remove_missing_is_a_noop() {
        let mut scene = Scene::new();
        let mut card = card(&mut scene);
        card.add_cell(&mut scene, "Item 1", None);
        card.add_cell(&mut scene, "Item 2", None);
        let mut other = self::card(&mut scene);
        let stranger = other.add_cell(&mut scene, "Elsewhere", None);

        let height = card.height();
        assert!(!card.remove_cell_at(&mut scene, 2));
        assert!(!card.remove_cell(&mut scene, stranger));
        assert_eq!(card.len(), 2);
        assert_eq!(card.height(), height);
    }

    #[test]
    fn test_remove_last_cell_moves_divider_rule() {
        let mut scene = Scene::new();
        let mut card = card(&mut scene);
        card.add_cell(&mut scene, "Item 1", None);
        let second = card.add_cell(&mut scene, "Item 2", None);
        let second_surface = card.items()[1].surface();

        assert!(card.remove_cell(&mut scene, second));
        assert!(!scene.contains(second_surface));
        assert_eq!(dividers(&card), vec![false]);
        assert_eq!(card.height(), 53.0);
    }

    #[test]
    fn test_remove_only_cell_empties_card() {
        let mut scene = Scene::new();
        let mut card = card(&mut scene);
        card.add_cell(&mut scene, "Only", None);
        assert!(card.remove_cell_at(&mut scene, 0));
        assert!(card.is_empty());
        assert_eq!(card.height(), 0.0);
        assert!(scene.children(card.content()).is_empty());
        assert_eq!(scene.frame(card.content()).height, 0.0);
    }

    #[test]
    fn test_materialize_is_idempotent() {
        let mut scene = Scene::new();
        let mut card = card(&mut scene);
        card.add_cell(&mut scene, "Item", None);
        card.set_background(&mut scene, Some(Rgba::gray(255)));

        let snapshot = |scene: &Scene| -> (Layer, Layer) {
            (
                scene.layer(card.surface()).unwrap().clone(),
                scene.layer(card.content()).unwrap().clone(),
            )
        };
        card.materialize(&mut scene);
        let first = snapshot(&scene);
        card.materialize(&mut scene);
        assert_eq!(snapshot(&scene), first);

        let (surface, content) = first;
        let shadow = surface.shadow.unwrap();
        assert_eq!(shadow.offset, Point::new(0.0, 1.0));
        assert_eq!(shadow.radius, 1.5);
        assert_eq!(shadow.opacity, 0.5);
        assert_eq!(shadow.color, card.appearance().shadow_color);
        assert_eq!(shadow.path_corner_radius, Some(3.0));
        assert_eq!(content.corner_radius, 3.0);
        assert!(content.clips);
        assert_eq!(content.background, Some(Rgba::gray(255)));
    }

    #[test]
    fn test_tapping_a_cell_ripples_then_runs_action() {
        let mut stage = Stage::new();
        let mut card = card(&mut stage.scene);
        card.set_origin(&mut stage.scene, Point::new(10.0, 10.0));
        let (action, calls) = counting_action();
        card.add_cell(&mut stage.scene, "Plain", None);
        card.add_cell(&mut stage.scene, "Tappable", Some(action));

        let tappable = card.items()[1].surface();
        assert_eq!(stage.tap(Point::new(50.0, 80.0)), Some(tappable));
        // disc, overlay, both on the tapped cell
        let groups: Vec<&AnimationGroup> = stage.animator.running().collect();
        assert_eq!(groups.len(), 2);
        assert_eq!(calls.get(), 0);

        stage.tick(Duration::from_millis(900));
        assert_eq!(calls.get(), 1);
        assert!(!stage.is_animating());

        // the untapped row has no binding and nothing above it does either
        assert_eq!(stage.tap(Point::new(50.0, 20.0)), None);
    }

    #[test]
    fn test_card_ripple_pulses_shadow() {
        let mut stage = Stage::new();
        let mut card = card(&mut stage.scene);
        card.add_header(&mut stage.scene, "Header");
        let (action, calls) = counting_action();
        card.add_ripple(&mut stage.scene, Some(action));

        assert_eq!(stage.tap(Point::new(5.0, 5.0)), Some(card.content()));
        let groups: Vec<&AnimationGroup> = stage.animator.running().collect();
        // ripple without overlay plus the pulse
        assert_eq!(groups.len(), 2);
        let pulse = groups
            .iter()
            .find(|group| group.key == SHADOW_ANIMATION_KEY)
            .unwrap();
        assert_eq!(pulse.target, card.surface());
        assert_eq!(pulse.duration, Duration::from_millis(1800));
        let radius = &pulse.animations[0];
        assert_eq!(
            (radius.property, radius.from, radius.to),
            (Property::ShadowRadius, 1.5, 6.0)
        );
        assert!(radius.autoreverses);
        let offset = &pulse.animations[1];
        assert_eq!(
            (offset.property, offset.from, offset.to),
            (Property::ShadowOffsetY, 1.0, 7.0)
        );

        stage.tick(Duration::from_millis(900));
        assert_eq!(calls.get(), 1);
        let presented = stage.scene.layer(card.surface()).unwrap().effective_shadow().unwrap();
        assert!(presented.radius > 1.5);

        stage.tick(Duration::from_millis(900));
        assert!(!stage.is_animating());
        let settled = stage.scene.layer(card.surface()).unwrap().effective_shadow().unwrap();
        assert_eq!(settled.radius, 1.5);
        assert_eq!(calls.get(), 1);
    }

    #[test]
    fn test_destroy_removes_whole_tree() {
        let mut scene = Scene::new();
        let mut card = card(&mut scene);
        card.add_header(&mut scene, "Header");
        card.add_cell(&mut scene, "Item", None);
        card.destroy(&mut scene);
        assert!(scene.is_empty());
    }

    #[derive(Debug, Clone)]
    enum Op {
        Header(String),
        Cell(String),
        Footer(String),
        RemoveAt(usize),
    }

    fn op() -> impl Strategy<Value = Op> {
        let text = "[a-z ]{0,40}";
        prop_oneof![
            text.prop_map(Op::Header),
            text.prop_map(Op::Cell),
            text.prop_map(Op::Footer),
            (0usize..8).prop_map(Op::RemoveAt),
        ]
    }

    proptest! {
        #[test]
        fn test_layout_invariants_hold_after_every_operation(ops in prop::collection::vec(op(), 0..24)) {
            let mut scene = Scene::new();
            let mut card = Card::with_parts(
                &mut scene,
                Rect::new(0.0, 0.0, 20.0, 0.0),
                None,
                CardMetrics::terminal(),
                Rc::new(MonospaceMeasure::cells()),
            );

            for op in ops {
                let len = card.len();
                let height = card.height();
                match op {
                    Op::Header(text) => { card.add_header(&mut scene, &text); }
                    Op::Cell(text) => { card.add_cell(&mut scene, &text, None); }
                    Op::Footer(text) => { card.add_footer(&mut scene, &text); }
                    Op::RemoveAt(index) => {
                        let removed = card.remove_cell_at(&mut scene, index);
                        prop_assert_eq!(removed, index < len);
                        if !removed {
                            prop_assert_eq!(card.len(), len);
                            prop_assert_eq!(card.height(), height);
                        }
                    }
                }

                prop_assert!((card.height() - sum_heights(&card)).abs() < 1e-3);
                prop_assert_eq!(scene.frame(card.surface()).height, card.height());
                let mut offset = 0.0;
                for (index, cell) in card.items().iter().enumerate() {
                    prop_assert!((cell.offset() - offset).abs() < 1e-3);
                    prop_assert_eq!(cell.has_bottom_divider(), index + 1 != card.len());
                    if let Some(divider) = cell.divider() {
                        prop_assert!(scene.frame(divider).max_y() <= cell.height() + 1e-3);
                    }
                    offset += cell.height();
                }
            }
        }
    }
}
