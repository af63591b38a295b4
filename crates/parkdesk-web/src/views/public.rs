use askama::Template;

/// Which overlay the public page opens with, if any.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Modal {
    Login,
    Register,
}

impl Modal {
    pub fn from_key(key: &str) -> Option<Self> {
        match key {
            "login" => Some(Self::Login),
            "register" => Some(Self::Register),
            _ => None,
        }
    }
}

#[derive(Template)]
#[template(path = "public/index.html")]
pub struct PublicPage {
    pub show_login: bool,
    pub show_register: bool,
    pub login_email: String,
    pub signed_in: bool,
    pub notice: Option<String>,
}

impl PublicPage {
    pub fn new(modal: Option<Modal>, login_email: String, signed_in: bool) -> Self {
        Self {
            show_login: modal == Some(Modal::Login),
            show_register: modal == Some(Modal::Register),
            login_email,
            signed_in,
            notice: None,
        }
    }
}
