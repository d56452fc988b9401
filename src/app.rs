//! Demo application state: a stage with two cards and a log of tap
//! actions.

use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;

use crossterm::event::KeyCode;
use tracing::info;

use crate::card::Card;
use crate::config::{CardMetrics, Config};
use crate::geometry::{Point, Rect};
use crate::models::{Appearance, TextAlignment};
use crate::ripple::Action;
use crate::scene::{Content, Label, Stage, SurfaceId};
use crate::text::{AttributedText, MonospaceMeasure, TextMeasure};

/// Left and top margin of the first card
const MARGIN: f32 = 2.0;
/// Rows between stacked cards
const CARD_GAP: f32 = 2.0;
/// Most recent status messages kept
const STATUS_HISTORY: usize = 50;

/// Application state
pub struct App {
    pub stage: Stage,
    /// The item list card followed by the plain card
    pub cards: Vec<Card>,
    status: Rc<RefCell<Vec<String>>>,
    next_item: usize,
    next_header: usize,
    next_footer: usize,
    pub should_quit: bool,
}

impl App {
    pub fn new(config: Config, width: u16) -> Self {
        let appearance = Rc::new(config.appearance);
        let metrics = config.metrics.unwrap_or_else(CardMetrics::terminal);
        let measure: Rc<dyn TextMeasure> = Rc::new(MonospaceMeasure::cells());
        let width = f32::from(width).max(1.0);

        let mut stage = Stage::new();
        let status = Rc::new(RefCell::new(Vec::new()));
        let mut cards = Vec::with_capacity(2);

        let frame = Rect::new(MARGIN, MARGIN, width, 0.0);
        let mut list = Card::with_parts(
            &mut stage.scene,
            frame,
            Some(Rc::clone(&appearance)),
            metrics,
            Rc::clone(&measure),
        );
        list.add_header(&mut stage.scene, "Header");
        for item in 1..=2 {
            let label = format!("Item {item}");
            list.add_cell(&mut stage.scene, &label, Some(log_action(&status, &label)));
        }
        let footer = attributed_footer(&mut stage, &list, measure.as_ref());
        list.add_footer_view(&mut stage.scene, footer);
        cards.push(list);

        let plain = Card::with_parts(&mut stage.scene, frame, Some(appearance), metrics, measure);
        cards.push(plain);
        let plain = &mut cards[1];
        plain.add_cell(&mut stage.scene, "\n\nPlain Material Card\n\n", None);
        plain.add_ripple(&mut stage.scene, Some(log_action(&status, "plain card")));

        let mut app = Self {
            stage,
            cards,
            status,
            next_item: 3,
            next_header: 2,
            next_footer: 2,
            should_quit: false,
        };
        app.stack_cards();
        app
    }

    pub fn handle_key(&mut self, code: KeyCode) {
        match code {
            KeyCode::Char('q') | KeyCode::Esc => self.should_quit = true,
            KeyCode::Char('a') => {
                let label = format!("Item {}", self.next_item);
                self.next_item += 1;
                let action = log_action(&self.status, &label);
                self.cards[0].add_cell(&mut self.stage.scene, &label, Some(action));
            }
            KeyCode::Char('d') => {
                let scene = &mut self.stage.scene;
                let list = &mut self.cards[0];
                if let Some(last) = list.len().checked_sub(1) {
                    list.remove_cell_at(scene, last);
                }
            }
            KeyCode::Char('h') => {
                let title = format!("Header {}", self.next_header);
                self.next_header += 1;
                self.cards[0].add_header(&mut self.stage.scene, &title);
            }
            KeyCode::Char('f') => {
                let title = format!("Footer {}", self.next_footer);
                self.next_footer += 1;
                self.cards[0].add_footer(&mut self.stage.scene, &title);
            }
            _ => return,
        }
        self.stack_cards();
    }

    /// Route a left click at a terminal cell, relative to the scene area
    pub fn handle_click(&mut self, column: u16, row: u16) -> Option<SurfaceId> {
        let point = Point::new(f32::from(column) + 0.5, f32::from(row) + 0.5);
        self.stage.tap(point)
    }

    pub fn tick(&mut self, dt: Duration) {
        self.stage.tick(dt);
    }

    pub fn latest_status(&self) -> Option<String> {
        self.status.borrow().last().cloned()
    }

    /// Place cards top to bottom after any height change
    fn stack_cards(&mut self) {
        let mut y = MARGIN;
        for card in &self.cards {
            card.set_origin(&mut self.stage.scene, Point::new(MARGIN, y));
            y += card.height() + CARD_GAP;
        }
    }
}

/// Action that records `what` in the status log
fn log_action(status: &Rc<RefCell<Vec<String>>>, what: &str) -> Action {
    let status = Rc::clone(status);
    let message = format!("tapped {what}");
    Rc::new(move || {
        info!(action = %message, "tap action");
        let mut log = status.borrow_mut();
        if log.len() == STATUS_HISTORY {
            log.remove(0);
        }
        log.push(message.clone());
    })
}

/// Container holding a centered two-style label, for use as a footer view
fn attributed_footer(stage: &mut Stage, card: &Card, measure: &dyn TextMeasure) -> SurfaceId {
    let appearance: &Appearance = card.appearance();
    let title = AttributedText::plain("Footer Label", &appearance.title_font, appearance.title_color);
    let text = title.with_underlined_run(
        "\nsome attributed string",
        &appearance.text_font,
        appearance.text_color,
        appearance.title_color,
    );

    let padding = card.metrics().item_padding_vertical;
    let width = (card.width() - card.metrics().item_padding).max(0.0);
    let height = measure.height_for_width(&text, width) + padding * 2.0;

    let scene = &mut stage.scene;
    let container = scene.create(Rect::new(0.0, 0.0, card.width(), height));
    let label = scene.create(Rect::new(card.metrics().item_padding / 2.0, 0.0, width, height));
    if let Some(layer) = scene.layer_mut(label) {
        layer.content = Content::Label(Label {
            text,
            alignment: TextAlignment::Center,
            padding,
        });
    }
    scene.add_child(container, label);
    container
}
