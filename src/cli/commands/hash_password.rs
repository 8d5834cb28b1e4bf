use crate::cli::parser::Commands;
use crate::errors::{AppError, AppResult};
use crate::session::hash_password;
use std::io::{self, BufRead};

/// Print the argon2 hash of a password, ready to paste under `users`.
pub fn handle(cmd: &Commands) -> AppResult<()> {
    if let Commands::HashPassword { password } = cmd {
        let password = match password {
            Some(p) => p.clone(),
            None => {
                let mut line = String::new();
                io::stdin().lock().read_line(&mut line)?;
                line.trim_end_matches(['\r', '\n']).to_string()
            }
        };

        if password.is_empty() {
            return Err(AppError::PasswordHash("empty password".into()));
        }

        println!("{}", hash_password(&password)?);
    }
    Ok(())
}
