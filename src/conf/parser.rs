//! Recursive-descent reader for configuration entries.

use std::io::BufRead;

use super::action::ConfigAction;
use super::scanner::Scanner;
use crate::error::{DakotaError, Result};

/// Parser driving a [`ConfigAction`] from configuration text.
pub struct Parser<R, A> {
    scanner: Scanner<R>,
    action: A,
}

impl<R: BufRead, A: ConfigAction> Parser<R, A> {
    /// Create a new parser reporting to `action`.
    pub fn new(input: R, action: A) -> Self {
        Self {
            scanner: Scanner::new(input),
            action,
        }
    }

    /// Give back the consumer.
    pub fn into_action(self) -> A {
        self.action
    }

    /// Parse entries until end of stream or the first failure.
    ///
    /// Events already delivered before a failure are not retracted.
    pub fn parse(&mut self) -> Result<()> {
        while self.scanner.at_new_entry()? {
            let line = self.scanner.line();
            let Some(verb) = self.scanner.token()? else {
                break;
            };
            log::debug!("line {}: {}", line, verb);

            match verb.as_str() {
                ".device" => self.read_device(line)?,
                ".comment" => self.read_comment(line)?,
                ".sysconfig" => self.read_sysconfig(line)?,
                ".tile" => self.read_tile(line)?,
                ".tile_group" => self.read_tile_group(line)?,
                ".bram_init" => self.read_bram(line)?,
                _ => return Err(DakotaError::UnknownVerb { line, verb }),
            }
        }

        Ok(())
    }

    fn field(&mut self, line: usize, record: &'static str, fields: &'static str) -> Result<String> {
        self.scanner
            .inline_token()?
            .ok_or(DakotaError::missing(line, record, fields))
    }

    fn pair(
        &mut self,
        line: usize,
        record: &'static str,
        fields: &'static str,
    ) -> Result<(String, String)> {
        let first = self.field(line, record, fields)?;
        let second = self.field(line, record, fields)?;
        Ok((first, second))
    }

    fn read_device(&mut self, line: usize) -> Result<()> {
        let name = self.field(line, "device", "name")?;
        self.action.on_device(&name)
    }

    fn read_comment(&mut self, line: usize) -> Result<()> {
        let text = self
            .scanner
            .rest_of_line()?
            .ok_or(DakotaError::EmptyComment { line })?;
        self.action.on_comment(&text)
    }

    fn read_sysconfig(&mut self, line: usize) -> Result<()> {
        let (name, value) = self.pair(line, "sysconfig", "name and value")?;
        self.action.on_sysconfig(&name, &value)
    }

    fn read_tile(&mut self, line: usize) -> Result<()> {
        let name = self.field(line, "tile", "name")?;
        self.action.on_tile(&name)?;
        self.read_tile_conf()
    }

    /// All names on the header line share one body and one commit.
    fn read_tile_group(&mut self, line: usize) -> Result<()> {
        let name = self.field(line, "tile_group", "name")?;
        self.action.on_tile(&name)?;

        while let Some(name) = self.scanner.inline_token()? {
            self.action.on_tile(&name)?;
        }

        self.read_tile_conf()
    }

    fn read_tile_conf(&mut self) -> Result<()> {
        while self.scanner.has_record()? {
            let line = self.scanner.line();
            let Some(keyword) = self.scanner.token()? else {
                break;
            };
            log::trace!("line {}: {}", line, keyword);

            match keyword.as_str() {
                "arc:" => {
                    let (sink, source) = self.pair(line, "arc", "sink and source")?;
                    self.action.on_arc(&sink, &source)?;
                }
                "word:" => {
                    let (name, value) = self.pair(line, "word", "name and value")?;
                    self.action.on_word(&name, &value)?;
                }
                "enum:" => {
                    let (name, value) = self.pair(line, "enum", "name and value")?;
                    self.action.on_enum(&name, &value)?;
                }
                "unknown:" => {
                    let value = self.field(line, "unknown", "value")?;
                    self.action.on_unknown(&value)?;
                }
                _ => return Err(DakotaError::UnknownTileRecord { line, keyword }),
            }
        }

        log::debug!("commit tile block");
        self.action.on_commit()
    }

    fn read_bram(&mut self, line: usize) -> Result<()> {
        let token = self.field(line, "bram_init", "index")?;
        let index = token
            .parse::<u32>()
            .map_err(|_| DakotaError::InvalidBramIndex { line, token })?;
        self.action.on_bram(index)?;

        let mut position = 0usize;
        while self.scanner.has_record()? {
            let line = self.scanner.line();
            let Some(token) = self.scanner.token()? else {
                break;
            };
            let value = parse_hex(&token).ok_or(DakotaError::InvalidBramValue { line, token })?;
            self.action.on_data(index, position, value)?;
            position += 1;
        }

        log::debug!("commit bram block {} ({} values)", index, position);
        self.action.on_commit()
    }
}

/// Parse a hexadecimal value with an optional `0x` prefix.
pub fn parse_hex(text: &str) -> Option<u32> {
    let digits = text
        .strip_prefix("0x")
        .or_else(|| text.strip_prefix("0X"))
        .unwrap_or(text);
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
        return None;
    }
    u32::from_str_radix(digits, 16).ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::conf::Event;

    fn events(input: &str) -> (Result<()>, Vec<Event>) {
        let mut parser = Parser::new(input.as_bytes(), Vec::new());
        let result = parser.parse();
        (result, parser.into_action())
    }

    fn tile(name: &str) -> Event {
        Event::Tile(name.to_string())
    }

    #[test]
    fn test_parse_hex() {
        assert_eq!(parse_hex("0a"), Some(0x0a));
        assert_eq!(parse_hex("0x1F"), Some(0x1f));
        assert_eq!(parse_hex("FFFFFFFF"), Some(u32::MAX));
        assert_eq!(parse_hex("100000000"), None);
        assert_eq!(parse_hex("0x"), None);
        assert_eq!(parse_hex("+1"), None);
        assert_eq!(parse_hex("1g"), None);
    }

    #[test]
    fn test_parse_device() {
        let (result, log) = events(".device LFE5U-45F\n");
        result.unwrap();
        assert_eq!(log, vec![Event::Device("LFE5U-45F".into())]);
    }

    #[test]
    fn test_device_requires_name() {
        let (result, log) = events(".device\nLFE5U-45F\n");
        let err = result.unwrap_err();
        assert!(matches!(
            err,
            DakotaError::MissingField {
                line: 1,
                record: "device",
                ..
            }
        ));
        assert!(log.is_empty());
    }

    #[test]
    fn test_comment_keeps_whole_line() {
        let (result, log) = events(".comment Part: LFE5U-25F-6CABGA256\n");
        result.unwrap();
        assert_eq!(log, vec![Event::Comment("Part: LFE5U-25F-6CABGA256".into())]);

        let (result, _) = events(".comment   \n");
        assert!(matches!(
            result.unwrap_err(),
            DakotaError::EmptyComment { line: 1 }
        ));
    }

    #[test]
    fn test_sysconfig_requires_value() {
        let (result, _) = events(".sysconfig MCCLK_FREQ\n");
        assert_eq!(
            result.unwrap_err().to_string(),
            "line 1: sysconfig requires name and value"
        );
    }

    #[test]
    fn test_missing_field_messages() {
        let cases = [
            (".tile\n", "line 1: tile requires name"),
            (".tile_group \n", "line 1: tile_group requires name"),
            (".bram_init\n", "line 1: bram_init requires index"),
            (".tile A\nword: W\n", "line 2: word requires name and value"),
            (".tile A\nenum: E\n", "line 2: enum requires name and value"),
            (".tile A\nunknown:\n", "line 2: unknown requires value"),
            (".tile A\narc:", "line 2: arc requires sink and source"),
        ];

        for (input, message) in cases {
            let (result, _) = events(input);
            let err = result.unwrap_err();
            assert!(
                matches!(err, DakotaError::MissingField { .. }),
                "{:?}: {:?}",
                input,
                err
            );
            assert_eq!(err.to_string(), message, "input {:?}", input);
        }
    }

    #[test]
    fn test_trailing_hash_in_block_is_rejected() {
        let (result, log) = events(".tile A\narc: x y # note\n");
        assert!(matches!(
            &result.unwrap_err(),
            DakotaError::UnknownTileRecord { line: 2, keyword } if keyword == "#"
        ));
        assert!(!log.contains(&Event::Commit));

        let (result, _) = events(".bram_init 0\n0a # note\n");
        assert!(matches!(
            result.unwrap_err(),
            DakotaError::InvalidBramValue { line: 2, .. }
        ));
    }

    #[test]
    fn test_tile_block() {
        let input = "\
.tile R2C2:PLC2
arc: A0 H02W0701
word: SLICEA.K0.INIT 1010101010101010
enum: SLICEA.MODE LOGIC
unknown: F54B1
.device X
";
        let (result, log) = events(input);
        result.unwrap();
        assert_eq!(
            log,
            vec![
                tile("R2C2:PLC2"),
                Event::Arc {
                    sink: "A0".into(),
                    source: "H02W0701".into()
                },
                Event::Word {
                    name: "SLICEA.K0.INIT".into(),
                    value: "1010101010101010".into()
                },
                Event::Enum {
                    name: "SLICEA.MODE".into(),
                    value: "LOGIC".into()
                },
                Event::Unknown("F54B1".into()),
                Event::Commit,
                Event::Device("X".into()),
            ]
        );
    }

    #[test]
    fn test_empty_tile_block_commits() {
        let (result, log) = events(".tile A\n.tile B");
        result.unwrap();
        assert_eq!(log, vec![tile("A"), Event::Commit, tile("B"), Event::Commit]);
    }

    #[test]
    fn test_tile_group_shares_one_commit() {
        let input = ".tile_group A B C\narc: x y\n.device D\n";
        let (result, log) = events(input);
        result.unwrap();
        assert_eq!(
            log,
            vec![
                tile("A"),
                tile("B"),
                tile("C"),
                Event::Arc {
                    sink: "x".into(),
                    source: "y".into()
                },
                Event::Commit,
                Event::Device("D".into()),
            ]
        );
    }

    #[test]
    fn test_tile_group_names_end_at_line_break() {
        let (result, log) = events(".tile_group A B \t\nunknown: F1B1\n");
        result.unwrap();
        assert_eq!(
            log,
            vec![tile("A"), tile("B"), Event::Unknown("F1B1".into()), Event::Commit]
        );
    }

    #[test]
    fn test_unknown_tile_record_skips_commit() {
        let (result, log) = events(".tile A\narc: x y\nbits: 0101\n.tile B\n");
        let err = result.unwrap_err();
        assert!(matches!(
            &err,
            DakotaError::UnknownTileRecord { line: 3, keyword } if keyword == "bits:"
        ));
        assert!(!log.contains(&Event::Commit));
        assert!(!log.contains(&tile("B")));
    }

    #[test]
    fn test_arc_requires_source_on_same_line() {
        let (result, _) = events(".tile A\narc: x\ny\n");
        assert_eq!(
            result.unwrap_err().to_string(),
            "line 2: arc requires sink and source"
        );
    }

    #[test]
    fn test_bram_block() {
        let (result, log) = events(".bram_init 5\n0a\n1b\n2c\n");
        result.unwrap();
        assert_eq!(
            log,
            vec![
                Event::Bram(5),
                Event::Data {
                    index: 5,
                    position: 0,
                    value: 0x0a
                },
                Event::Data {
                    index: 5,
                    position: 1,
                    value: 0x1b
                },
                Event::Data {
                    index: 5,
                    position: 2,
                    value: 0x2c
                },
                Event::Commit,
            ]
        );
    }

    #[test]
    fn test_bram_values_span_lines() {
        let (result, log) = events(".bram_init 0\n000 001 002\n003\n.bram_init 1\n");
        result.unwrap();
        let data = log
            .iter()
            .filter(|e| matches!(e, Event::Data { index: 0, .. }))
            .count();
        assert_eq!(data, 4);
        assert_eq!(log.last(), Some(&Event::Commit));
    }

    #[test]
    fn test_bram_rejects_bad_values() {
        let (result, _) = events(".bram_init -1\n");
        assert!(matches!(
            result.unwrap_err(),
            DakotaError::InvalidBramIndex { .. }
        ));

        let (result, log) = events(".bram_init 2\n0a\nzz\n");
        assert!(matches!(
            result.unwrap_err(),
            DakotaError::InvalidBramValue { line: 3, .. }
        ));
        assert!(!log.contains(&Event::Commit));
    }

    #[test]
    fn test_unknown_verb_stops_parse() {
        let (result, log) = events(".device A\n.frobnicate\n.device B\n");
        let err = result.unwrap_err();
        assert!(err.to_string().contains(".frobnicate"));
        assert_eq!(log, vec![Event::Device("A".into())]);
    }

    #[test]
    fn test_verbs_are_case_sensitive() {
        let (result, _) = events(".Device A\n");
        assert!(matches!(
            result.unwrap_err(),
            DakotaError::UnknownVerb { .. }
        ));
    }

    #[test]
    fn test_comment_lines_anywhere_between_entries() {
        let input = "# header\n.tile A\n# trailing body\narc: x y\n# between\n.device D\n# last";
        let (result, log) = events(input);
        result.unwrap();
        assert_eq!(
            log,
            vec![
                tile("A"),
                Event::Arc {
                    sink: "x".into(),
                    source: "y".into()
                },
                Event::Commit,
                Event::Device("D".into()),
            ]
        );
    }

    #[test]
    fn test_consumer_failure_propagates_unchanged() {
        struct RejectWords(Vec<Event>);

        impl ConfigAction for RejectWords {
            fn on_tile(&mut self, name: &str) -> Result<()> {
                self.0.on_tile(name)
            }

            fn on_word(&mut self, name: &str, _value: &str) -> Result<()> {
                Err(DakotaError::rejected(format!("word {} not allowed", name)))
            }

            fn on_commit(&mut self) -> Result<()> {
                self.0.on_commit()
            }
        }

        let mut parser = Parser::new(
            ".tile A\nword: W 1\n.tile B\n".as_bytes(),
            RejectWords(Vec::new()),
        );
        let err = parser.parse().unwrap_err();
        assert_eq!(err.to_string(), "word W not allowed");
        assert_eq!(parser.into_action().0, vec![tile("A")]);
    }

    #[test]
    fn test_empty_input_succeeds() {
        let (result, log) = events("");
        result.unwrap();
        assert!(log.is_empty());

        let (result, _) = events("\n\n# nothing here\n");
        result.unwrap();
    }

    #[test]
    fn test_crlf_input() {
        let (result, log) = events(".tile_group A B\r\narc: x y\r\n.sysconfig K V\r\n");
        result.unwrap();
        assert_eq!(log.len(), 5);
        assert_eq!(
            log[4],
            Event::Sysconfig {
                name: "K".into(),
                value: "V".into()
            }
        );
    }
}
