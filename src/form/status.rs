pub const SENDING: &str = "Enviando sua inscrição...";
pub const GENERIC_FAILURE: &str = "Ocorreu um erro ao se inscrever. Tente novamente.";
pub const CONNECTION_FAILURE: &str =
    "Não foi possível conectar ao servidor. Verifique sua conexão e tente novamente.";

/// Styling of the status line. Maps onto the class list of `#form-message`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusKind {
    Neutral,
    Success,
    Error,
}

impl StatusKind {
    pub fn css_class(self) -> &'static str {
        match self {
            StatusKind::Neutral => "",
            StatusKind::Success => "success",
            StatusKind::Error => "error",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusMessage {
    pub text: String,
    pub kind: StatusKind,
}

impl StatusMessage {
    pub fn sending() -> Self {
        Self { text: SENDING.to_string(), kind: StatusKind::Neutral }
    }

    pub fn thank_you(name: &str) -> Self {
        Self {
            text: format!("Obrigado, {}! Você foi adicionado à Lista VIP com sucesso!", name),
            kind: StatusKind::Success,
        }
    }

    pub fn error(text: impl Into<String>) -> Self {
        Self { text: text.into(), kind: StatusKind::Error }
    }
}
