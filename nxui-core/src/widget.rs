use std::cell::Cell;
use std::collections::BTreeMap;
use std::rc::Rc;

use crate::action::Action;
use crate::context::{AppContext, SoundEffect};
use crate::geometry::{Vec2, Vec4};
use crate::hints::{UiButton, ui_buttons};
use crate::i18n::I18n;
use crate::input::{ActionType, Button, Controller, TouchInfo};
use crate::render::{DrawFrame, TextMeasure};

/// Shared pop-request flag.
///
/// Action closures hold a clone so they can ask for their widget to be
/// removed; the owner polls [`Widget::should_pop`] at the end of a frame.
#[derive(Debug, Clone, Default)]
pub struct PopHandle(Rc<Cell<bool>>);

impl PopHandle {
    pub fn request(&self) {
        self.0.set(true);
    }

    pub fn is_requested(&self) -> bool {
        self.0.get()
    }
}

/// Bindings, geometry and focus state shared by every widget.
#[derive(Debug, Default)]
pub struct Widget {
    actions: BTreeMap<Button, Action>,
    pos: Vec4,
    button_pos: Vec2,
    focus: bool,
    hidden: bool,
    pop: PopHandle,
}

impl Widget {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn pos(&self) -> Vec4 {
        self.pos
    }

    pub fn set_pos(&mut self, pos: Vec4) {
        self.pos = pos;
    }

    pub fn set_y(&mut self, y: f32) {
        self.pos.y = y;
    }

    /// Anchor of the right-most button hint.
    pub fn ui_button_pos(&self) -> Vec2 {
        self.button_pos
    }

    pub fn set_ui_button_pos(&mut self, pos: Vec2) {
        self.button_pos = pos;
    }

    pub fn has_focus(&self) -> bool {
        self.focus
    }

    pub fn on_focus_gained(&mut self) {
        self.focus = true;
    }

    pub fn on_focus_lost(&mut self) {
        self.focus = false;
    }

    pub fn is_hidden(&self) -> bool {
        self.hidden
    }

    pub fn set_hidden(&mut self, hidden: bool) {
        self.hidden = hidden;
    }

    pub fn set_pop(&self) {
        self.pop.request();
    }

    pub fn should_pop(&self) -> bool {
        self.pop.is_requested()
    }

    pub fn pop_handle(&self) -> PopHandle {
        self.pop.clone()
    }

    pub fn has_action(&self, button: Button) -> bool {
        self.actions.contains_key(&button)
    }

    /// Bind `action` to `button`, replacing any previous binding.
    pub fn set_action(&mut self, button: Button, action: Action) {
        self.actions.insert(button, action);
    }

    pub fn remove_action(&mut self, button: Button) {
        self.actions.remove(&button);
    }

    pub fn remove_actions(&mut self) {
        self.actions.clear();
    }

    pub fn action(&self, button: Button) -> Option<&Action> {
        self.actions.get(&button)
    }

    /// Bindings in button order.
    pub fn actions(&self) -> impl Iterator<Item = (Button, &Action)> {
        self.actions.iter().map(|(button, action)| (*button, action))
    }

    /// Run the binding for `button` if its type intersects `kind`.
    pub fn fire_action(
        &self,
        button: Button,
        kind: ActionType,
        ctx: &mut dyn AppContext,
    ) -> bool {
        let Some(action) = self.actions.get(&button) else {
            return false;
        };
        if !action.kind().intersects(kind) {
            return false;
        }

        ctx.play_sound(SoundEffect::Focus);
        action.invoke(ctx, true);
        true
    }

    /// Dispatch this frame's input to at most one controller binding and at
    /// most one tapped button hint.
    pub fn update(
        &mut self,
        controller: &Controller,
        touch: &TouchInfo,
        ctx: &mut dyn AppContext,
    ) {
        for (button, action) in &self.actions {
            let kind = action.kind();
            if kind.contains(ActionType::DOWN) && controller.got_down(*button)
            {
                if button.intersects(Button::ANY_BUTTON) {
                    ctx.play_sound(SoundEffect::Focus);
                }
                action.invoke(ctx, true);
                break;
            } else if kind.contains(ActionType::UP)
                && controller.got_up(*button)
            {
                action.invoke(ctx, false);
                break;
            } else if kind.contains(ActionType::HELD)
                && controller.got_held(*button)
            {
                action.invoke(ctx, true);
                break;
            }
        }

        if !touch.is_clicked {
            return;
        }

        let tapped = self
            .ui_buttons(ctx.fonts(), ctx.i18n())
            .into_iter()
            .find(|hint| touch.in_range(&hint.pos));
        if let Some(hint) = tapped {
            log::debug!("button hint tapped: {}", hint.hint);
            self.fire_action(hint.button, ActionType::DOWN, ctx);
        }
    }

    pub fn ui_buttons<M: TextMeasure + ?Sized>(
        &self,
        fonts: &M,
        i18n: &I18n,
    ) -> Vec<UiButton> {
        ui_buttons(self.actions(), self.button_pos, fonts, i18n)
    }

    pub fn draw(&self, frame: &mut DrawFrame<'_>) {
        let buttons = ui_buttons(
            self.actions(),
            self.button_pos,
            &*frame.renderer,
            frame.i18n,
        );
        for button in &buttons {
            button.draw(frame);
        }
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;

    use super::*;
    use crate::headless::HeadlessApp;

    fn recording(log: &Rc<RefCell<Vec<(&'static str, bool)>>>, name: &'static str) -> Action {
        let log = log.clone();
        Action::with_type(ActionType::DOWN, name, move |_, press| {
            log.borrow_mut().push((name, press));
        })
    }

    #[test]
    fn given_repeated_bindings_when_set_then_latest_wins() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let mut widget = Widget::new();
        let mut app = HeadlessApp::new();

        widget.set_action(Button::A, recording(&log, "first"));
        widget.set_action(Button::B, recording(&log, "back"));
        widget.set_action(Button::A, recording(&log, "second"));
        widget.remove_action(Button::B);

        assert_eq!(widget.actions().count(), 1);
        assert_eq!(widget.action(Button::A).map(Action::hint), Some("second"));
        assert!(widget.fire_action(Button::A, ActionType::DOWN, &mut app));
        assert_eq!(*log.borrow(), vec![("second", true)]);
    }

    #[test]
    fn given_binding_when_fired_with_disjoint_mask_then_nothing_runs() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let mut widget = Widget::new();
        let mut app = HeadlessApp::new();
        widget.set_action(Button::A, recording(&log, "ok"));

        assert!(!widget.fire_action(Button::A, ActionType::UP, &mut app));
        assert!(!widget.fire_action(Button::B, ActionType::DOWN, &mut app));
        assert!(widget.fire_action(
            Button::A,
            ActionType::UP | ActionType::DOWN,
            &mut app
        ));
        assert_eq!(*log.borrow(), vec![("ok", true)]);
        assert_eq!(app.sounds(), &[SoundEffect::Focus]);
    }

    #[test]
    fn given_two_pressed_bindings_when_updated_then_only_first_fires() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let mut widget = Widget::new();
        let mut app = HeadlessApp::new();
        widget.set_action(Button::A, recording(&log, "ok"));
        widget.set_action(Button::B, recording(&log, "back"));

        widget.update(
            &Controller::pressed(Button::A | Button::B),
            &TouchInfo::default(),
            &mut app,
        );

        assert_eq!(*log.borrow(), vec![("ok", true)]);
        assert_eq!(app.sounds(), &[SoundEffect::Focus]);
    }

    #[test]
    fn given_up_and_held_bindings_when_updated_then_press_flag_matches_edge() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let sink = log.clone();
        let mut widget = Widget::new();
        let mut app = HeadlessApp::new();
        widget.set_action(
            Button::ANY_DOWN,
            Action::with_type(
                ActionType::UP | ActionType::HELD,
                "",
                move |_, press| sink.borrow_mut().push(("scroll", press)),
            ),
        );

        widget.update(
            &Controller::from_held(Button::empty(), Button::DPAD_DOWN),
            &TouchInfo::default(),
            &mut app,
        );
        widget.update(
            &Controller::from_held(Button::DPAD_DOWN, Button::empty()),
            &TouchInfo::default(),
            &mut app,
        );

        assert_eq!(*log.borrow(), vec![("scroll", true), ("scroll", false)]);
        assert!(app.sounds().is_empty());
    }

    #[test]
    fn given_tap_on_button_hint_when_updated_then_its_action_fires() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let mut widget = Widget::new();
        let mut app = HeadlessApp::new();
        widget.set_ui_button_pos(Vec2::new(1000.0, 675.0));
        widget.set_action(Button::A, recording(&log, "OK"));
        widget.set_action(Button::B, recording(&log, "Back"));

        let back = widget
            .ui_buttons(app.fonts(), app.i18n())
            .into_iter()
            .find(|hint| hint.button == Button::B)
            .expect("back hint should be laid out");
        let centre = Vec2::new(
            back.pos.x + back.pos.w / 2.0,
            back.pos.y + back.pos.h / 2.0,
        );

        widget.update(&Controller::default(), &TouchInfo::click(centre), &mut app);

        assert_eq!(*log.borrow(), vec![("Back", true)]);
    }

    #[test]
    fn pop_handle_is_shared_with_widget() {
        let widget = Widget::new();
        let handle = widget.pop_handle();
        assert!(!widget.should_pop());

        handle.request();

        assert!(widget.should_pop());
    }
}
