use log::Level;

#[cfg(debug_assertions)]
pub fn log_level() -> Level {
    Level::Debug  // Verbose console output when running locally
}

#[cfg(not(debug_assertions))]
pub fn log_level() -> Level {
    Level::Info
}

pub const ANCHOR_SELECTOR: &str = "a[href^=\"#\"]";

pub const REVEAL_SELECTOR: &str = ".beneficio-item.hidden, .tabela-container.hidden, .colecao-imagem-container.hidden, .depoimento-item.hidden";

/// Share of an element's area that must be on screen before it is revealed.
pub const REVEAL_THRESHOLD: f64 = 0.1;

pub const VISIBLE_CLASS: &str = "visible";

pub const NAME_INPUT_ID: &str = "nome";
pub const EMAIL_INPUT_ID: &str = "email";
pub const PHONE_INPUT_ID: &str = "telefone";
pub const FORM_MESSAGE_ID: &str = "form-message";

/// Controls disabled while a signup request is pending.
pub const SUBMIT_CONTROL_SELECTOR: &str = "button:not([type]), button[type=\"submit\"], input[type=\"submit\"]";

pub const ACCEPT_JSON: &str = "application/json";

/// The DOM contract the enhancer binds to. Defaults match the landing page markup.
#[derive(Debug, Clone, PartialEq)]
pub struct PageConfig {
    pub anchor_selector: &'static str,
    pub reveal_selector: &'static str,
    pub reveal_threshold: f64,
    pub visible_class: &'static str,
    pub name_input_id: &'static str,
    pub email_input_id: &'static str,
    pub phone_input_id: &'static str,
    pub form_message_id: &'static str,
    pub submit_control_selector: &'static str,
}

impl Default for PageConfig {
    fn default() -> Self {
        Self {
            anchor_selector: ANCHOR_SELECTOR,
            reveal_selector: REVEAL_SELECTOR,
            reveal_threshold: REVEAL_THRESHOLD,
            visible_class: VISIBLE_CLASS,
            name_input_id: NAME_INPUT_ID,
            email_input_id: EMAIL_INPUT_ID,
            phone_input_id: PHONE_INPUT_ID,
            form_message_id: FORM_MESSAGE_ID,
            submit_control_selector: SUBMIT_CONTROL_SELECTOR,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reveal_selector_covers_all_four_sections() {
        let config = PageConfig::default();
        for class in ["beneficio-item", "tabela-container", "colecao-imagem-container", "depoimento-item"] {
            assert!(config.reveal_selector.contains(&format!(".{}.hidden", class)));
        }
        assert_eq!(config.reveal_threshold, 0.1);
    }
}
