//! Terminal notifier and navigator
//!
//! Stdout carries response bodies only, so both write to stderr.

use session_hooks::{Navigator, Notifier};

pub const LOGIN_HINT: &str =
    "Session ended. Run `sessionctl login <ACCESS_TOKEN> <REFRESH_TOKEN>` to sign in again.";

#[derive(Debug, Default)]
pub struct ConsoleNotifier;

impl Notifier for ConsoleNotifier {
    fn notify(&self, message: &str) {
        eprintln!("{message}");
    }
}

/// A CLI has no login page to navigate to; it tells the user how to log in.
#[derive(Debug, Default)]
pub struct ConsoleNavigator;

impl Navigator for ConsoleNavigator {
    fn redirect_to_login(&self) {
        eprintln!("{LOGIN_HINT}");
    }
}
