#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Mood {
    Starving = 0,
    Boring = 1,
    Tired = 2,
    Sad = 3,
    Fine = 4,
    Happy = 5,
    Sleeping = 6,
}

impl Mood {
    pub fn code(&self) -> u8 {
        *self as u8
    }

    /// Moods that cost a life when the pet is left in them after an action.
    pub fn is_unhappy(&self) -> bool {
        matches!(self, Mood::Starving | Mood::Boring | Mood::Tired | Mood::Sad)
    }
}

impl std::fmt::Display for Mood {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Mood::Starving => write!(f, "starving"),
            Mood::Boring => write!(f, "boring"),
            Mood::Tired => write!(f, "tired"),
            Mood::Sad => write!(f, "sad"),
            Mood::Fine => write!(f, "fine"),
            Mood::Happy => write!(f, "happy"),
            Mood::Sleeping => write!(f, "sleeping"),
        }
    }
}

/// Need vector: `[feed, play, hygiene-dirty, rest]`.
pub type NeedVector = [bool; 4];

/// Reference examples the classifier is built from.
pub struct DecisionTable {
    rows: Vec<(NeedVector, Mood)>,
}

impl Default for DecisionTable {
    fn default() -> Self {
        use Mood::*;
        DecisionTable {
            rows: vec![
                ([true, true, false, true], Happy),
                ([true, false, false, true], Fine),
                ([true, false, true, true], Sad),
                ([false, false, true, true], Sad),
                ([false, false, true, false], Sad),
                ([true, true, false, false], Boring),
                ([true, false, false, false], Tired),
                ([false, false, false, true], Starving),
                ([false, true, false, true], Starving),
            ],
        }
    }
}

impl DecisionTable {
    pub fn rows(&self) -> &[(NeedVector, Mood)] {
        &self.rows
    }
}

/// Split order: feed and hygiene dominate, rest is consulted last.
const SPLIT_ORDER: [usize; 4] = [0, 2, 1, 3];

#[derive(Debug, Clone, PartialEq)]
enum Node {
    Leaf(Mood),
    Split {
        feature: usize,
        when_false: Box<Node>,
        when_true: Box<Node>,
    },
}

/// Deterministic decision tree over need vectors.
#[derive(Debug, Clone)]
pub struct MoodClassifier {
    root: Node,
}

impl Default for MoodClassifier {
    fn default() -> Self {
        Self::new(&DecisionTable::default())
    }
}

impl MoodClassifier {
    pub fn new(table: &DecisionTable) -> Self {
        let rows: Vec<_> = table.rows().to_vec();
        let root = Self::build(&rows, 0, Mood::Starving);
        MoodClassifier { root }
    }

    fn build(rows: &[(NeedVector, Mood)], depth: usize, fallback: Mood) -> Node {
        if rows.is_empty() {
            return Node::Leaf(fallback);
        }

        let majority = Self::majority(rows);
        if depth == SPLIT_ORDER.len() || rows.iter().all(|(_, mood)| *mood == majority) {
            return Node::Leaf(majority);
        }

        let feature = SPLIT_ORDER[depth];
        let (yes, no): (Vec<_>, Vec<_>) = rows.iter().copied().partition(|(v, _)| v[feature]);

        Node::Split {
            feature,
            when_false: Box::new(Self::build(&no, depth + 1, majority)),
            when_true: Box::new(Self::build(&yes, depth + 1, majority)),
        }
    }

    /// Most frequent mood; ties go to the lower code.
    fn majority(rows: &[(NeedVector, Mood)]) -> Mood {
        let mut counts = [0usize; 7];
        for (_, mood) in rows {
            counts[mood.code() as usize] += 1;
        }
        rows.iter()
            .map(|(_, mood)| *mood)
            .max_by(|a, b| {
                counts[a.code() as usize]
                    .cmp(&counts[b.code() as usize])
                    .then(b.cmp(a))
            })
            .unwrap_or(Mood::Starving)
    }

    pub fn classify(&self, vector: NeedVector) -> Mood {
        let mut node = &self.root;
        loop {
            match node {
                Node::Leaf(mood) => return *mood,
                Node::Split { feature, when_false, when_true } => {
                    node = if vector[*feature] { &**when_true } else { &**when_false };
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn all_vectors() -> impl Iterator<Item = NeedVector> {
        (0u8..16).map(|bits| {
            [bits & 8 != 0, bits & 4 != 0, bits & 2 != 0, bits & 1 != 0]
        })
    }

    #[test]
    fn test_reproduces_every_table_row() {
        let table = DecisionTable::default();
        let classifier = MoodClassifier::new(&table);
        for (vector, mood) in table.rows() {
            assert_eq!(classifier.classify(*vector), *mood, "vector {:?}", vector);
        }
    }

    #[test]
    fn test_dirty_pet_is_sad() {
        let classifier = MoodClassifier::default();
        for vector in all_vectors().filter(|v| v[2]) {
            assert_eq!(classifier.classify(vector), Mood::Sad, "vector {:?}", vector);
        }
    }

    #[test]
    fn test_hungry_clean_pet_is_starving() {
        let classifier = MoodClassifier::default();
        assert_eq!(classifier.classify([false, false, false, false]), Mood::Starving);
        assert_eq!(classifier.classify([false, true, false, false]), Mood::Starving);
    }

    #[test]
    fn test_rest_alone_is_not_happiness() {
        let classifier = MoodClassifier::default();
        assert_eq!(classifier.classify([false, false, false, true]), Mood::Starving);
        assert_eq!(classifier.classify([true, true, false, false]), Mood::Boring);
    }

    #[test]
    fn test_never_classifies_sleeping() {
        let classifier = MoodClassifier::default();
        assert!(all_vectors().all(|v| classifier.classify(v) != Mood::Sleeping));
    }

    #[test]
    fn test_majority_ties_go_low() {
        let rows = [
            ([true, true, true, true], Mood::Happy),
            ([true, true, true, true], Mood::Tired),
        ];
        assert_eq!(MoodClassifier::majority(&rows), Mood::Tired);
    }

    #[test]
    fn test_mood_codes_and_names() {
        assert_eq!(Mood::Starving.code(), 0);
        assert_eq!(Mood::Happy.code(), 5);
        assert_eq!(Mood::Sleeping.code(), 6);
        assert_eq!(Mood::Fine.to_string(), "fine");
        assert!(Mood::Sad.is_unhappy());
        assert!(!Mood::Fine.is_unhappy());
    }
}
