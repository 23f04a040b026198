use std::any::Any;

use poise_core::{Color, Size, WidgetBehavior};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum PressState {
    #[default]
    Normal,
    Pressed,
    Disabled,
}

/// Pressable widget. The tree drives the press state through focus; the
/// button keeps the current state and the transitions it went through so a
/// renderer can pick the matching texture.
#[derive(Clone, Debug, Default)]
pub struct Button {
    pub title: String,
    state: PressState,
    transitions: Vec<PressState>,
    tint: Color,
    size: Size,
}

impl Button {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Self::default()
        }
    }

    pub fn state(&self) -> PressState {
        self.state
    }

    pub fn transitions(&self) -> &[PressState] {
        &self.transitions
    }

    pub fn tint(&self) -> Color {
        self.tint
    }

    /// Size of the title area, following the widget's resolved size.
    pub fn size(&self) -> Size {
        self.size
    }

    fn enter(&mut self, state: PressState) {
        log::trace!("button {:?}: {:?} -> {state:?}", self.title, self.state);
        self.state = state;
        self.transitions.push(state);
    }
}

impl WidgetBehavior for Button {
    fn description(&self) -> &'static str {
        "Button"
    }

    fn on_press_state_changed_to_normal(&mut self) {
        self.enter(PressState::Normal);
    }

    fn on_press_state_changed_to_pressed(&mut self) {
        self.enter(PressState::Pressed);
    }

    fn on_press_state_changed_to_disabled(&mut self) {
        self.enter(PressState::Disabled);
    }

    fn on_size_changed(&mut self, size: Size) {
        self.size = size;
    }

    fn update_tint(&mut self, color: Color) {
        self.tint = color;
    }

    fn create_clone_instance(&self) -> Box<dyn WidgetBehavior> {
        Box::new(Button::default())
    }

    fn copy_special_properties(&mut self, model: &dyn WidgetBehavior) {
        if let Some(m) = model.as_any().downcast_ref::<Button>() {
            self.title = m.title.clone();
        }
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}
