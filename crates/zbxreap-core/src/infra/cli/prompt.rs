// Copyright 2025 Dotanuki Labs
// SPDX-License-Identifier: MIT

use anyhow::Context;
use std::io::{self, Write};

pub static CONFIRMATION_QUESTION: &str = "Are you sure? Type 'yes' to continue: ";

pub enum ConfirmationPrompt {
    Terminal,
    #[cfg(test)]
    Scripted(String),
    #[cfg(test)]
    Stalled,
}

impl ConfirmationPrompt {
    pub async fn confirm(&self, question: &str) -> anyhow::Result<bool> {
        let answer = match self {
            ConfirmationPrompt::Terminal => Self::ask_on_terminal(question).await?,
            #[cfg(test)]
            ConfirmationPrompt::Scripted(answer) => answer.clone(),
            #[cfg(test)]
            ConfirmationPrompt::Stalled => std::future::pending().await,
        };

        Ok(is_affirmative(&answer))
    }

    async fn ask_on_terminal(question: &str) -> anyhow::Result<String> {
        print!("{}", question);
        io::stdout().flush()?;

        // stdin reads block, keep them away from the runtime so interruptions are still observed
        let answer = tokio::task::spawn_blocking(|| {
            let mut input = String::new();
            io::stdin().read_line(&mut input).map(|_| input)
        })
        .await?
        .context("[zbxreap.prompt] cannot read confirmation")?;

        Ok(answer)
    }
}

fn is_affirmative(answer: &str) -> bool {
    answer.trim_end_matches(['\r', '\n']).eq_ignore_ascii_case("yes")
}
