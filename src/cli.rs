use clap::Parser;

use crate::core::Action;

#[derive(Parser, Debug)]
#[command(author, version, about = "Look after a tiny terminal pet")]
pub struct Args {
    /// (e)at, (p)lay, (c)lean, (s)leep or (r)efresh; anything else just looks
    #[arg(allow_hyphen_values = true)]
    pub action: Option<String>,
}

impl Args {
    pub fn action(&self) -> Action {
        Action::from_arg(self.action.as_deref())
    }
}

impl Action {
    /// Single-letter command, case-insensitive. Unknown input is a refresh.
    pub fn from_arg(arg: Option<&str>) -> Action {
        let mut chars = arg.unwrap_or_default().chars();
        let letter = match (chars.next(), chars.next()) {
            (Some(c), None) => c.to_ascii_lowercase(),
            _ => return Action::Refresh,
        };

        match letter {
            'e' => Action::Feed,
            'p' => Action::Play,
            'c' => Action::Clean,
            's' => Action::Rest,
            _ => Action::Refresh,
        }
    }
}
