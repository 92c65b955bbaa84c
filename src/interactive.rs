use std::io;

use rand::RngCore;
use tracing::error;

use crate::account::{AccountError, AccountStore, Session};
use crate::cli::Console;
use crate::game::{play_match, ComputerPlayer, HumanPlayer};

/// Menu-driven front end. Owns the session of this run.
pub struct App<'a> {
    store: AccountStore,
    session: Session,
    console: Console<'a>,
    rng: Box<dyn RngCore + 'a>,
}

impl<'a> App<'a> {
    pub fn new(store: AccountStore, console: Console<'a>) -> Self {
        Self::with_rng(store, console, rand::thread_rng())
    }

    /// Use a specific random source for the computer player.
    pub fn with_rng(store: AccountStore, console: Console<'a>, rng: impl RngCore + 'a) -> Self {
        Self {
            store,
            session: Session::new(),
            console,
            rng: Box::new(rng),
        }
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn store(&self) -> &AccountStore {
        &self.store
    }

    /// Main menu loop. Returns on "Exit" or when input runs out.
    pub fn run(&mut self) -> io::Result<()> {
        loop {
            self.console.say("\n--- Main Menu ---")?;
            self.console.say("1. Register user")?;
            self.console.say("2. Log in")?;
            self.console.say("3. Edit password")?;
            self.console.say("4. Delete account")?;
            self.console.say("5. Select game mode")?;
            self.console.say("6. Log out")?;
            self.console.say("7. Exit")?;

            let Some(choice) = self.console.prompt("Select an option: ")? else {
                return Ok(());
            };

            match choice.trim() {
                "1" => self.register()?,
                "2" => self.login()?,
                "3" => self.edit_password()?,
                "4" => self.delete_account()?,
                "5" => self.select_game_mode()?,
                "6" => self.logout()?,
                "7" => {
                    self.console.say("Exiting the game. Goodbye!")?;
                    return Ok(());
                }
                _ => self.console.say("Invalid option. Try again.")?,
            }
        }
    }

    fn register(&mut self) -> io::Result<()> {
        let Some((username, password)) = self.ask_credentials()? else {
            return Ok(());
        };
        match self.store.register(&username, &password) {
            Ok(_) => self.console.say(format!("User {} registered successfully.", username)),
            Err(e) => self.report(e),
        }
    }

    fn login(&mut self) -> io::Result<()> {
        let Some((username, password)) = self.ask_credentials()? else {
            return Ok(());
        };
        match self.store.authenticate(&mut self.session, &username, &password) {
            Ok(()) => self.console.say(format!("Login successful. Welcome {}!", username)),
            Err(e) => self.report(e),
        }
    }

    fn edit_password(&mut self) -> io::Result<()> {
        let Some(username) = self.session.current().map(str::to_string) else {
            return self.console.say("You must log in to change your password.");
        };
        let Some(new_password) = self.console.prompt("New password: ")? else {
            return Ok(());
        };
        match self.store.edit_password(&username, &new_password) {
            Ok(()) => self.console.say(format!("Password for {} updated successfully.", username)),
            Err(e) => self.report(e),
        }
    }

    fn delete_account(&mut self) -> io::Result<()> {
        let Some(username) = self.console.prompt("Username to delete: ")? else {
            return Ok(());
        };
        let was_logged_in = self.session.is_user(&username);
        match self.store.delete_account(&mut self.session, &username) {
            Ok(()) => {
                if was_logged_in {
                    self.console.say(format!(
                        "Account {} has been deleted. Your session has been closed.",
                        username
                    ))?;
                }
                self.console.say(format!("Account {} deleted successfully.", username))
            }
            Err(e) => self.report(e),
        }
    }

    fn logout(&mut self) -> io::Result<()> {
        match self.store.logout(&mut self.session) {
            Some(user) => self.console.say(format!("Session of {} closed.", user)),
            None => self.console.say("No active session."),
        }
    }

    fn select_game_mode(&mut self) -> io::Result<()> {
        self.console.say("\n--- Select Game Mode ---")?;
        self.console.say("1. Player vs Computer")?;
        self.console.say("2. Player vs Player")?;

        let Some(choice) = self.console.prompt("Select an option: ")? else {
            return Ok(());
        };
        match choice.trim() {
            "1" => self.play_vs_computer(),
            "2" => self.play_vs_human(),
            _ => self.console.say("Invalid option. Try again."),
        }
    }

    fn play_vs_computer(&mut self) -> io::Result<()> {
        let Some(user) = self.session.current() else {
            return self.console.say("You must log in to play against the computer.");
        };
        let mut human = HumanPlayer::named(user);
        let mut computer = ComputerPlayer::new(&mut self.rng);

        play_match(&mut human, &mut computer, &mut self.console)?;
        self.console.pause("Press Enter to return to the main menu.")
    }

    fn play_vs_human(&mut self) -> io::Result<()> {
        let mut x = HumanPlayer::anonymous();
        let mut o = HumanPlayer::anonymous();

        play_match(&mut x, &mut o, &mut self.console)?;
        self.console.pause("Press Enter to return to the main menu.")
    }

    fn ask_credentials(&mut self) -> io::Result<Option<(String, String)>> {
        let Some(username) = self.console.prompt("Username: ")? else {
            return Ok(None);
        };
        let Some(password) = self.console.prompt("Password: ")? else {
            return Ok(None);
        };
        Ok(Some((username, password)))
    }

    /// Validation errors are shown as-is; storage faults are also logged.
    fn report(&mut self, err: AccountError) -> io::Result<()> {
        if !err.is_validation() {
            error!(error = %err, "account storage failure");
        }
        self.console.say(format!("Error: {}", err))
    }
}
