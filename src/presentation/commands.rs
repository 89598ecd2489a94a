use crate::domain::keybinding::{Action, Keybind};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use std::collections::HashMap;
use tracing::{debug, warn};

pub struct CommandRegistry {
    display_bindings: HashMap<Action, KeyEvent>,
    input_bindings: Vec<(KeyEvent, Action)>,
}

impl Default for CommandRegistry {
    fn default() -> Self {
        let mut display_bindings = HashMap::new();
        let mut input_bindings = Vec::new();

        let mut register = |action: Action, code: KeyCode, modifiers: KeyModifiers, is_primary| {
            let key = KeyEvent::new(code, modifiers);
            if is_primary {
                display_bindings.insert(action, key);
            }
            input_bindings.push((key, action));
        };

        register(Action::Quit, KeyCode::Char('q'), KeyModifiers::NONE, true);
        register(Action::Quit, KeyCode::Char('c'), KeyModifiers::CONTROL, false);

        register(Action::FocusNext, KeyCode::Tab, KeyModifiers::NONE, true);
        register(Action::FocusPrevious, KeyCode::BackTab, KeyModifiers::NONE, true);

        register(Action::NavigateUp, KeyCode::Up, KeyModifiers::NONE, true);
        register(Action::NavigateUp, KeyCode::Char('k'), KeyModifiers::NONE, false);
        register(Action::NavigateDown, KeyCode::Down, KeyModifiers::NONE, true);
        register(Action::NavigateDown, KeyCode::Char('j'), KeyModifiers::NONE, false);

        register(Action::Select, KeyCode::Enter, KeyModifiers::NONE, true);
        register(Action::Select, KeyCode::Char(' '), KeyModifiers::NONE, false);

        register(Action::DeleteAircraft, KeyCode::Char('d'), KeyModifiers::NONE, true);
        register(Action::NextManufacturer, KeyCode::Char(']'), KeyModifiers::NONE, true);
        register(Action::PreviousManufacturer, KeyCode::Char('['), KeyModifiers::NONE, true);
        register(Action::Reload, KeyCode::Char('r'), KeyModifiers::NONE, true);
        register(Action::Reload, KeyCode::F(5), KeyModifiers::NONE, false);

        register(Action::BuyOne, KeyCode::Char('b'), KeyModifiers::NONE, true);
        register(Action::SellOne, KeyCode::Char('s'), KeyModifiers::NONE, true);

        register(Action::SubmitForm, KeyCode::Enter, KeyModifiers::NONE, true);
        register(Action::ClearForm, KeyCode::Char('u'), KeyModifiers::CONTROL, true);

        Self {
            display_bindings,
            input_bindings,
        }
    }
}

impl CommandRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds the default registry with user bindings from the config file
    /// taking precedence. Unparseable key strings are skipped.
    pub fn with_overrides(overrides: &HashMap<String, Action>) -> Self {
        let mut registry = Self::default();
        for (spec, action) in overrides {
            match parse_key(spec) {
                Some(key) => {
                    debug!(key = %spec, action = ?action, "Custom keybinding");
                    registry.bind(key, *action);
                }
                None => warn!(key = %spec, "Ignoring unrecognized keybinding"),
            }
        }
        registry
    }

    /// Binds `key` to `action` ahead of every existing binding.
    pub fn bind(&mut self, key: KeyEvent, action: Action) {
        let key = normalize(key);
        self.display_bindings.insert(action, key);
        self.input_bindings.insert(0, (key, action));
    }

    pub fn get(&self, action: Action) -> Option<KeyEvent> {
        self.display_bindings.get(&action).copied()
    }

    /// Resolves a key to the first bound action among `allowed`.
    pub fn find_action(&self, key: KeyEvent, allowed: &[Action]) -> Option<Action> {
        let key = normalize(key);
        self.input_bindings
            .iter()
            .find(|(k, a)| {
                k.code == key.code && k.modifiers == key.modifiers && allowed.contains(a)
            })
            .map(|(_, a)| *a)
    }

    /// Footer entries for `actions`, in order, skipping unbound ones.
    pub fn keybinds(&self, actions: &[Action]) -> Vec<Keybind> {
        actions
            .iter()
            .filter_map(|action| {
                self.get(*action)
                    .map(|key| Keybind::new(key, *action, action.label()))
            })
            .collect()
    }
}

pub trait HasCommands {
    fn get_commands(&self, registry: &CommandRegistry) -> Vec<Keybind>;
}

/// Terminals report Shift on upper-case characters and on back-tab
/// inconsistently, so it is ignored for those codes.
fn normalize(key: KeyEvent) -> KeyEvent {
    match key.code {
        KeyCode::Char(_) | KeyCode::BackTab => {
            KeyEvent::new(key.code, key.modifiers.difference(KeyModifiers::SHIFT))
        }
        _ => KeyEvent::new(key.code, key.modifiers),
    }
}

/// Parses a key description such as `"Ctrl+r"`, `"Shift+Tab"`, `"F5"` or `"]"`.
pub fn parse_key(spec: &str) -> Option<KeyEvent> {
    let spec = spec.trim();
    if spec.is_empty() {
        return None;
    }

    let (modifier_part, key_part) = match spec.rsplit_once('+') {
        Some((mods, "")) => (Some(mods.trim_end_matches('+')), "+"),
        Some((mods, key)) => (Some(mods), key),
        None => (None, spec),
    };

    let mut modifiers = KeyModifiers::NONE;
    if let Some(mods) = modifier_part.filter(|m| !m.is_empty()) {
        for modifier in mods.split('+') {
            modifiers |= match modifier.trim().to_lowercase().as_str() {
                "ctrl" | "control" | "c" => KeyModifiers::CONTROL,
                "alt" | "a" => KeyModifiers::ALT,
                "shift" | "s" => KeyModifiers::SHIFT,
                _ => return None,
            };
        }
    }

    let code = match key_part.to_lowercase().as_str() {
        "enter" | "return" => KeyCode::Enter,
        "esc" | "escape" => KeyCode::Esc,
        "tab" if modifiers.contains(KeyModifiers::SHIFT) => KeyCode::BackTab,
        "tab" => KeyCode::Tab,
        "backtab" => KeyCode::BackTab,
        "space" => KeyCode::Char(' '),
        "backspace" => KeyCode::Backspace,
        "delete" | "del" => KeyCode::Delete,
        "up" => KeyCode::Up,
        "down" => KeyCode::Down,
        "left" => KeyCode::Left,
        "right" => KeyCode::Right,
        "home" => KeyCode::Home,
        "end" => KeyCode::End,
        lower if lower.len() > 1 && lower.starts_with('f') => {
            KeyCode::F(lower[1..].parse().ok()?)
        }
        _ => {
            let mut chars = key_part.chars();
            let c = chars.next()?;
            if chars.next().is_some() {
                return None;
            }
            KeyCode::Char(c)
        }
    };

    Some(normalize(KeyEvent::new(code, modifiers)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    fn key(code: KeyCode, modifiers: KeyModifiers) -> KeyEvent {
        KeyEvent::new(code, modifiers)
    }

    #[test_case("Ctrl+r", KeyCode::Char('r'), KeyModifiers::CONTROL ; "ctrl_char")]
    #[test_case("ctrl+alt+x", KeyCode::Char('x'), KeyModifiers::CONTROL | KeyModifiers::ALT ; "two_modifiers")]
    #[test_case("Shift+Tab", KeyCode::BackTab, KeyModifiers::NONE ; "shift_tab")]
    #[test_case("F5", KeyCode::F(5), KeyModifiers::NONE ; "function_key")]
    #[test_case("Enter", KeyCode::Enter, KeyModifiers::NONE ; "named")]
    #[test_case("space", KeyCode::Char(' '), KeyModifiers::NONE ; "space")]
    #[test_case("]", KeyCode::Char(']'), KeyModifiers::NONE ; "bracket")]
    #[test_case("Ctrl++", KeyCode::Char('+'), KeyModifiers::CONTROL ; "plus")]
    #[test_case("R", KeyCode::Char('R'), KeyModifiers::NONE ; "upper_case")]
    fn test_parse_key(spec: &str, code: KeyCode, modifiers: KeyModifiers) {
        assert_eq!(parse_key(spec), Some(key(code, modifiers)));
    }

    #[test_case("" ; "empty")]
    #[test_case("Hyper+x" ; "unknown_modifier")]
    #[test_case("abc" ; "word")]
    #[test_case("Fx" ; "bad_function_key")]
    fn test_parse_key_rejects(spec: &str) {
        assert_eq!(parse_key(spec), None);
    }

    #[test]
    fn test_find_action_respects_allowed_set() {
        let registry = CommandRegistry::new();
        let enter = key(KeyCode::Enter, KeyModifiers::NONE);

        assert_eq!(
            registry.find_action(enter, &[Action::Select]),
            Some(Action::Select)
        );
        assert_eq!(
            registry.find_action(enter, &[Action::SubmitForm]),
            Some(Action::SubmitForm)
        );
        assert_eq!(registry.find_action(enter, &[Action::Quit]), None);
    }

    #[test]
    fn test_shift_is_ignored_on_characters() {
        let registry = CommandRegistry::new();
        let bracket = key(KeyCode::Char(']'), KeyModifiers::SHIFT);

        assert_eq!(
            registry.find_action(bracket, &[Action::NextManufacturer]),
            Some(Action::NextManufacturer)
        );
    }

    #[test]
    fn test_overrides_take_precedence() {
        let overrides = HashMap::from([
            ("Ctrl+r".to_string(), Action::Reload),
            ("x".to_string(), Action::DeleteAircraft),
            ("Nope+1".to_string(), Action::Quit),
        ]);
        let registry = CommandRegistry::with_overrides(&overrides);

        let ctrl_r = key(KeyCode::Char('r'), KeyModifiers::CONTROL);
        assert_eq!(
            registry.find_action(ctrl_r, &[Action::Reload]),
            Some(Action::Reload)
        );
        assert_eq!(registry.get(Action::Reload), Some(ctrl_r));
        assert_eq!(
            registry.find_action(key(KeyCode::Char('x'), KeyModifiers::NONE), &[Action::DeleteAircraft]),
            Some(Action::DeleteAircraft)
        );
        // Defaults stay bound.
        assert_eq!(
            registry.find_action(key(KeyCode::Char('d'), KeyModifiers::NONE), &[Action::DeleteAircraft]),
            Some(Action::DeleteAircraft)
        );
    }

    #[test]
    fn test_keybinds_skip_unbound() {
        let mut registry = CommandRegistry::new();
        registry.display_bindings.remove(&Action::SellOne);

        let binds = registry.keybinds(&[Action::BuyOne, Action::SellOne]);
        assert_eq!(binds.len(), 1);
        assert_eq!(binds[0].action, Action::BuyOne);
        assert_eq!(binds[0].label, "Buy +1");
    }
}
