//! The `Auftraggeber: ... Buchungstext: ...` format comdirect packs into the booking text.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Key {
    Orderer,
    Recipient,
    BookingText,
}

impl Key {
    fn from_word(word: &str) -> Option<Key> {
        match word.strip_suffix(':')? {
            "Auftraggeber" => Some(Key::Orderer),
            "Empfänger" => Some(Key::Recipient),
            "Buchungstext" => Some(Key::BookingText),
            _ => None,
        }
    }
}

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Narration {
    pub orderer: Option<String>,
    pub recipient: Option<String>,
    pub booking_text: Option<String>,
}

impl Narration {
    /// Never fails: text without any keyword parses to an empty `Narration`.
    pub fn parse(text: &str) -> Narration {
        let mut parsed = Narration::default();
        let mut current: Option<Key> = None;
        let mut words: Vec<&str> = Vec::new();

        for word in text.split(' ') {
            match Key::from_word(word) {
                Some(key) => {
                    parsed.flush(current, &mut words);
                    current = Some(key);
                }
                None => words.push(word),
            }
        }
        parsed.flush(current, &mut words);

        parsed
    }

    fn flush(&mut self, key: Option<Key>, words: &mut Vec<&str>) {
        let value = words.join(" ");
        words.clear();
        let slot = match key {
            Some(Key::Orderer) => &mut self.orderer,
            Some(Key::Recipient) => &mut self.recipient,
            Some(Key::BookingText) => &mut self.booking_text,
            // text before the first keyword
            None => return,
        };
        *slot = Some(value);
    }

    /// The other party: the orderer for incoming, the recipient for outgoing payments.
    pub fn counterparty(&self) -> Option<&str> {
        non_empty(&self.orderer).or_else(|| non_empty(&self.recipient))
    }

    pub fn text(&self) -> Option<&str> {
        non_empty(&self.booking_text)
    }
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|value| !value.is_empty())
}
