//! Floating combat text, queued so texts never overlap.
//!
//! Each text is a show state in a dedicated [`StateMachine`]: it rises for
//! the popup duration, then an optional gap passes before the next one.

use glam::Vec2;

use game_core::{AttackInstance, HitOutcome};
use state_machine::{State, StateMachine, Status, builder};

use crate::animation::Tween;
use crate::config::TimingConfig;

/// World units a text climbs while visible.
const RISE_HEIGHT: f32 = 0.5;

#[derive(Clone, Debug, PartialEq)]
pub struct FloatingText {
    pub text: String,
    /// World (x, z) position the text rises above.
    pub anchor: Vec2,
    /// Current height above the anchor.
    pub rise: f32,
}

/// What the popup states draw on.
#[derive(Debug, Default)]
pub struct PopupBoard {
    current: Option<FloatingText>,
    shown: Vec<FloatingText>,
}

pub struct PopupQueue {
    machine: StateMachine<PopupBoard>,
    board: PopupBoard,
    duration: f32,
    gap: f32,
}

impl PopupQueue {
    pub fn new(timing: &TimingConfig) -> Self {
        Self {
            machine: StateMachine::new(),
            board: PopupBoard::default(),
            duration: timing.popup_duration,
            gap: timing.popup_gap,
        }
    }

    /// Queues `text` to rise above `anchor` once earlier texts are done.
    pub fn enqueue(&mut self, text: impl Into<String>, anchor: Vec2) {
        if !self.machine.is_idle() && self.gap > 0.0 {
            self.machine.push(&mut self.board, builder::wait(self.gap));
        }
        let show = ShowText::new(text.into(), anchor, self.duration);
        self.machine.push(&mut self.board, builder::boxed(show));
    }

    /// Queues the texts for a landed hit: an effectiveness label when the
    /// matchup has a bonus, then the damage dealt.
    pub fn on_hit(&mut self, attack: &AttackInstance, outcome: &HitOutcome, anchor: Vec2) {
        if let Some(label) = effectiveness_label(attack.bonus) {
            self.enqueue(label, anchor);
        }
        self.enqueue(format!("{} DMG", format_amount(outcome.damage)), anchor);
    }

    pub fn tick(&mut self, dt: f32) {
        self.machine.tick(&mut self.board, dt);
    }

    /// The text currently on screen.
    pub fn visible(&self) -> Option<&FloatingText> {
        self.board.current.as_ref()
    }

    pub fn is_idle(&self) -> bool {
        self.machine.is_idle()
    }

    /// Texts that appeared since the last call, in order.
    pub fn drain_shown(&mut self) -> Vec<FloatingText> {
        std::mem::take(&mut self.board.shown)
    }
}

struct ShowText {
    text: Option<String>,
    anchor: Vec2,
    tween: Tween,
}

impl ShowText {
    fn new(text: String, anchor: Vec2, duration: f32) -> Self {
        Self {
            text: Some(text),
            anchor,
            tween: Tween::new(duration),
        }
    }
}

impl State<PopupBoard> for ShowText {
    fn on_start(&mut self, board: &mut PopupBoard) {
        let text = FloatingText {
            text: self.text.take().unwrap_or_default(),
            anchor: self.anchor,
            rise: 0.0,
        };
        board.shown.push(text.clone());
        board.current = Some(text);
    }

    fn on_update(&mut self, board: &mut PopupBoard, dt: f32) -> Status {
        let t = self.tween.advance(dt);
        if let Some(current) = board.current.as_mut() {
            current.rise = ease_out_quad(t) * RISE_HEIGHT;
        }
        Status::running_if(!self.tween.is_finished())
    }

    fn on_end(&mut self, board: &mut PopupBoard) {
        board.current = None;
    }

    fn name(&self) -> &'static str {
        "show_text"
    }
}

fn ease_out_quad(t: f32) -> f32 {
    t * (2.0 - t)
}

/// Label describing how favourable a type matchup was.
pub fn effectiveness_label(bonus: f32) -> Option<&'static str> {
    if bonus > 0.5 {
        Some("Super-Effective!")
    } else if bonus > 0.0 {
        Some("Effective!")
    } else if bonus < -0.5 {
        Some("Super-Weak!")
    } else if bonus < 0.0 {
        Some("Weak!")
    } else {
        None
    }
}

fn format_amount(amount: f32) -> String {
    if (amount - amount.round()).abs() < 0.05 {
        format!("{:.0}", amount)
    } else {
        format!("{:.1}", amount)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use game_core::UnitId;

    fn hit(bonus: f32, damage: f32) -> (AttackInstance, HitOutcome) {
        let attack = AttackInstance {
            attacker: UnitId(0),
            target: UnitId(1),
            bonus,
            total_damage: damage,
            lethal: false,
        };
        let outcome = HitOutcome {
            target: UnitId(1),
            damage,
            remaining_hp: 5.0,
            life_ratio: 0.5,
            killed: false,
        };
        (attack, outcome)
    }

    #[test]
    fn labels_follow_bonus_thresholds() {
        assert_eq!(effectiveness_label(0.8), Some("Super-Effective!"));
        assert_eq!(effectiveness_label(0.3), Some("Effective!"));
        assert_eq!(effectiveness_label(0.0), None);
        assert_eq!(effectiveness_label(-0.2), Some("Weak!"));
        assert_eq!(effectiveness_label(-0.7), Some("Super-Weak!"));
    }

    #[test]
    fn texts_show_one_after_another() {
        let mut queue = PopupQueue::new(&TimingConfig::new());
        let (attack, outcome) = hit(0.8, 5.4);
        queue.on_hit(&attack, &outcome, Vec2::ZERO);

        assert_eq!(queue.visible().unwrap().text, "Super-Effective!");
        queue.tick(0.5);
        assert!(queue.visible().unwrap().rise > 0.0);
        queue.tick(0.5);
        assert_eq!(queue.visible().unwrap().text, "5.4 DMG");
        queue.tick(1.0);
        assert!(queue.visible().is_none());
        assert!(queue.is_idle());

        let shown: Vec<_> = queue.drain_shown().into_iter().map(|t| t.text).collect();
        assert_eq!(shown, ["Super-Effective!", "5.4 DMG"]);
    }

    #[test]
    fn neutral_hit_only_shows_damage() {
        let mut queue = PopupQueue::new(&TimingConfig::new());
        let (attack, outcome) = hit(0.0, 3.0);
        queue.on_hit(&attack, &outcome, Vec2::ZERO);
        let shown: Vec<_> = queue.drain_shown().into_iter().map(|t| t.text).collect();
        assert_eq!(shown, ["3 DMG"]);
    }
}
