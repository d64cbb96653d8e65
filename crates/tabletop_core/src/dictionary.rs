//! Word list for word tic-tac-toe.

use std::collections::BTreeSet;

/// Length of the words the 3x3 board can spell.
pub const WORD_LEN: usize = 3;

const BUILTIN: &str = "
ACE ACT ADD AGE AGO AID AIM AIR ALL AND ANT ANY APE ARC ARE ARK ARM ART ASH ASK ATE AWE AXE
BAD BAG BAN BAR BAT BAY BED BEE BET BIG BIN BIT BOW BOX BOY BUD BUG BUS BUT BUY
CAB CAN CAP CAR CAT COW CRY CUB CUP CUT
DAY DEN DEW DID DIG DIM DOG DOT DRY DUE DUG DYE
EAR EAT EGG ELF ELK ELM END ERA EVE EYE
FAN FAR FAT FED FEW FIG FIN FIR FIT FIX FLY FOG FOR FOX FRY FUN FUR
GAP GAS GEM GET GOT GUM GUN GUT GUY
HAM HAT HAY HEN HER HID HIM HIP HIS HIT HOG HOP HOT HOW HUB HUG HUT
ICE ILL INK INN ION IVY
JAM JAR JAW JET JOB JOG JOY JUG
KEG KEY KID KIN KIT
LAB LAD LAG LAP LAW LAY LED LEG LET LID LIE LIP LIT LOG LOT LOW
MAD MAN MAP MAT MAY MEN MET MIX MOB MOP MUD MUG
NAP NET NEW NIL NOD NOR NOT NOW NUT
OAK OAR OAT ODD OFF OIL OLD ONE OPT ORB ORE OUR OUT OWL OWN
PAD PAN PAT PAW PAY PEA PEN PET PIE PIG PIN PIT POT PRY PUB PUT
RAG RAM RAN RAT RAW RAY RED RIB RID RIM RIP ROB ROD ROT ROW RUB RUG RUN
SAD SAT SAW SAY SEA SEE SET SEW SHE SIN SIP SIR SIT SIX SKY SLY SOB SON SOW SOY SPA SPY SUN
TAB TAG TAN TAP TAR TEA TEN THE TIE TIN TIP TOE TON TOO TOP TOW TOY TRY TUB TUG TWO
URN USE
VAN VAT VET VIA VOW
WAR WAS WAX WAY WEB WET WHO WHY WIG WIN WIT WON
YAK YAM YAP YES YET YOU
ZAP ZEN ZIP ZOO
";

/// Set of upper-case words of [`WORD_LEN`] letters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Dictionary {
    words: BTreeSet<String>,
}

/// The word list had nothing usable in it.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
#[display("Word list contains no {}-letter words", WORD_LEN)]
pub struct EmptyDictionary;

impl Dictionary {
    /// The built-in word list.
    pub fn builtin() -> Self {
        Self::parse(BUILTIN)
    }

    /// Parses whitespace-separated words, keeping alphabetic ones of the
    /// right length and upper-casing them.
    pub fn from_text(text: &str) -> Result<Self, EmptyDictionary> {
        let dictionary = Self::parse(text);
        if dictionary.is_empty() {
            Err(EmptyDictionary)
        } else {
            Ok(dictionary)
        }
    }

    fn parse(text: &str) -> Self {
        let words = text
            .split_whitespace()
            .filter(|w| w.chars().count() == WORD_LEN && w.chars().all(|c| c.is_ascii_alphabetic()))
            .map(|w| w.to_ascii_uppercase())
            .collect();
        Self { words }
    }

    /// Whether `word` is in the list (case-insensitive).
    pub fn contains(&self, word: &str) -> bool {
        self.words.contains(&word.to_ascii_uppercase())
    }

    /// Number of words.
    pub fn len(&self) -> usize {
        self.words.len()
    }

    /// Whether the list is empty.
    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    /// Counts words that fit a partially filled line; `None` matches any letter.
    pub fn completions(&self, pattern: &[Option<char>]) -> usize {
        self.words
            .iter()
            .filter(|word| {
                word.len() == pattern.len()
                    && word
                        .chars()
                        .zip(pattern)
                        .all(|(c, slot)| slot.is_none_or(|s| s == c))
            })
            .count()
    }
}

impl Default for Dictionary {
    fn default() -> Self {
        Self::builtin()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_is_three_letter_upper_case() {
        let dictionary = Dictionary::builtin();
        assert!(dictionary.len() > 200);
        assert!(dictionary.contains("cat"));
        assert!(!dictionary.contains("CATS"));
    }

    #[test]
    fn test_from_text_filters_and_rejects_empty() {
        let dictionary = Dictionary::from_text("dog\nhorse\nA1B owl").unwrap();
        assert_eq!(dictionary.len(), 2);
        assert_eq!(Dictionary::from_text("elephant"), Err(EmptyDictionary));
    }

    #[test]
    fn test_completions_respect_pattern() {
        let dictionary = Dictionary::from_text("CAT COT CAR DOG").unwrap();
        assert_eq!(dictionary.completions(&[Some('C'), None, Some('T')]), 2);
        assert_eq!(dictionary.completions(&[None, None, None]), 4);
        assert_eq!(dictionary.completions(&[Some('X'), None, None]), 0);
    }
}
