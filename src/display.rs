use crate::core::{Mood, PetStatus, Report};

pub const BANNER: &str = "Use (E)at, (P)lay, (C)lean, (S)leep, (R)efresh";

const ART_CONTENT: &str = r#"
     .-.
    ( - )
     " "
"#;

const ART_GLUM: &str = r#"
     .-. '
    ( - )
     " "
"#;

const ART_DIRTY: &str = r#"
     .-. '   s
    ( - )  S
     " "
"#;

const ART_ASLEEP: &str = r#"
     _-_   Z
    ( - ) z
     " "
"#;

const ART_DEAD: &str = r#"
     .-.
    ( x )
    _____
"#;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Art {
    Content,
    Glum,
    Dirty,
    Asleep,
    Dead,
}

impl Art {
    /// Death wins, then dirt, then the mood itself.
    pub fn for_report(report: &Report) -> Self {
        if report.status == PetStatus::Dead || report.lives == 0 {
            return Art::Dead;
        }
        if report.dirty {
            return Art::Dirty;
        }
        match report.mood {
            Some(Mood::Happy) | Some(Mood::Fine) => Art::Content,
            Some(Mood::Sleeping) => Art::Asleep,
            _ => Art::Glum,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Art::Content => ART_CONTENT,
            Art::Glum => ART_GLUM,
            Art::Dirty => ART_DIRTY,
            Art::Asleep => ART_ASLEEP,
            Art::Dead => ART_DEAD,
        }
    }
}

/// Status lines, the "Game Over" notice when it applies, and the picture.
pub fn render(report: &Report) -> String {
    let mut out = format!(
        "Live {}       Level {}\n             Status {}\n",
        report.lives,
        report.level,
        report.status_name()
    );
    if report.game_over() {
        out.push_str("Game Over\n");
    }
    out.push_str(Art::for_report(report).as_str());
    out
}
