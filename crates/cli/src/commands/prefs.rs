//! Preference commands.

#![allow(clippy::print_stdout)]

use pelussi_core::{Language, Theme};
use pelussi_storefront::StorefrontSession;

pub fn show(session: &StorefrontSession) {
    let prefs = session.preferences();
    println!("theme: {}", prefs.theme);
    println!("language: {}", prefs.language);
}

pub fn set_theme(session: &mut StorefrontSession, theme: Theme) {
    session.set_theme(theme);
    show(session);
}

pub fn set_language(session: &mut StorefrontSession, language: Language) {
    session.set_language(language);
    show(session);
}
