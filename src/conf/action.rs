//! Consumer interface for parse events.

use std::fmt;

use crate::error::Result;

/// Receiver of configuration parse events.
///
/// The parser calls exactly one method per parsed unit, synchronously and
/// in input order. Returning an error aborts the parse; the error is passed
/// back to the caller unchanged. Borrowed arguments are only valid for the
/// duration of the call.
///
/// Every method defaults to accepting the event, so a consumer only needs
/// to implement the events it cares about.
pub trait ConfigAction {
    /// `.device <name>`
    fn on_device(&mut self, _name: &str) -> Result<()> {
        Ok(())
    }

    /// `.comment <text>`
    fn on_comment(&mut self, _text: &str) -> Result<()> {
        Ok(())
    }

    /// `.sysconfig <name> <value>`
    fn on_sysconfig(&mut self, _name: &str, _value: &str) -> Result<()> {
        Ok(())
    }

    /// A tile name from `.tile` or `.tile_group`
    fn on_tile(&mut self, _name: &str) -> Result<()> {
        Ok(())
    }

    /// `arc: <sink> <source>`
    fn on_arc(&mut self, _sink: &str, _source: &str) -> Result<()> {
        Ok(())
    }

    /// `word: <name> <value>`
    fn on_word(&mut self, _name: &str, _value: &str) -> Result<()> {
        Ok(())
    }

    /// `enum: <name> <value>`
    fn on_enum(&mut self, _name: &str, _value: &str) -> Result<()> {
        Ok(())
    }

    /// `unknown: <value>`
    fn on_unknown(&mut self, _value: &str) -> Result<()> {
        Ok(())
    }

    /// `.bram_init <index>`
    fn on_bram(&mut self, _index: u32) -> Result<()> {
        Ok(())
    }

    /// One BRAM value at `position` within block `index`.
    fn on_data(&mut self, _index: u32, _position: usize, _value: u32) -> Result<()> {
        Ok(())
    }

    /// End of a tile or BRAM block body.
    fn on_commit(&mut self) -> Result<()> {
        Ok(())
    }
}

impl<A: ConfigAction + ?Sized> ConfigAction for &mut A {
    fn on_device(&mut self, name: &str) -> Result<()> {
        (**self).on_device(name)
    }

    fn on_comment(&mut self, text: &str) -> Result<()> {
        (**self).on_comment(text)
    }

    fn on_sysconfig(&mut self, name: &str, value: &str) -> Result<()> {
        (**self).on_sysconfig(name, value)
    }

    fn on_tile(&mut self, name: &str) -> Result<()> {
        (**self).on_tile(name)
    }

    fn on_arc(&mut self, sink: &str, source: &str) -> Result<()> {
        (**self).on_arc(sink, source)
    }

    fn on_word(&mut self, name: &str, value: &str) -> Result<()> {
        (**self).on_word(name, value)
    }

    fn on_enum(&mut self, name: &str, value: &str) -> Result<()> {
        (**self).on_enum(name, value)
    }

    fn on_unknown(&mut self, value: &str) -> Result<()> {
        (**self).on_unknown(value)
    }

    fn on_bram(&mut self, index: u32) -> Result<()> {
        (**self).on_bram(index)
    }

    fn on_data(&mut self, index: u32, position: usize, value: u32) -> Result<()> {
        (**self).on_data(index, position, value)
    }

    fn on_commit(&mut self) -> Result<()> {
        (**self).on_commit()
    }
}

/// A parse event as a value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    Device(String),
    Comment(String),
    Sysconfig { name: String, value: String },
    Tile(String),
    Arc { sink: String, source: String },
    Word { name: String, value: String },
    Enum { name: String, value: String },
    Unknown(String),
    Bram(u32),
    Data { index: u32, position: usize, value: u32 },
    Commit,
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Event::Device(name) => write!(f, "device {}", name),
            Event::Comment(text) => write!(f, "comment {}", text),
            Event::Sysconfig { name, value } => write!(f, "sysconfig {} {}", name, value),
            Event::Tile(name) => write!(f, "tile {}", name),
            Event::Arc { sink, source } => write!(f, "arc {} {}", sink, source),
            Event::Word { name, value } => write!(f, "word {} {}", name, value),
            Event::Enum { name, value } => write!(f, "enum {} {}", name, value),
            Event::Unknown(value) => write!(f, "unknown {}", value),
            Event::Bram(index) => write!(f, "bram {}", index),
            Event::Data {
                index,
                position,
                value,
            } => write!(f, "data {} {} {:03x}", index, position, value),
            Event::Commit => write!(f, "commit"),
        }
    }
}

/// Records every event in order.
impl ConfigAction for Vec<Event> {
    fn on_device(&mut self, name: &str) -> Result<()> {
        self.push(Event::Device(name.to_string()));
        Ok(())
    }

    fn on_comment(&mut self, text: &str) -> Result<()> {
        self.push(Event::Comment(text.to_string()));
        Ok(())
    }

    fn on_sysconfig(&mut self, name: &str, value: &str) -> Result<()> {
        self.push(Event::Sysconfig {
            name: name.to_string(),
            value: value.to_string(),
        });
        Ok(())
    }

    fn on_tile(&mut self, name: &str) -> Result<()> {
        self.push(Event::Tile(name.to_string()));
        Ok(())
    }

    fn on_arc(&mut self, sink: &str, source: &str) -> Result<()> {
        self.push(Event::Arc {
            sink: sink.to_string(),
            source: source.to_string(),
        });
        Ok(())
    }

    fn on_word(&mut self, name: &str, value: &str) -> Result<()> {
        self.push(Event::Word {
            name: name.to_string(),
            value: value.to_string(),
        });
        Ok(())
    }

    fn on_enum(&mut self, name: &str, value: &str) -> Result<()> {
        self.push(Event::Enum {
            name: name.to_string(),
            value: value.to_string(),
        });
        Ok(())
    }

    fn on_unknown(&mut self, value: &str) -> Result<()> {
        self.push(Event::Unknown(value.to_string()));
        Ok(())
    }

    fn on_bram(&mut self, index: u32) -> Result<()> {
        self.push(Event::Bram(index));
        Ok(())
    }

    fn on_data(&mut self, index: u32, position: usize, value: u32) -> Result<()> {
        self.push(Event::Data {
            index,
            position,
            value,
        });
        Ok(())
    }

    fn on_commit(&mut self) -> Result<()> {
        self.push(Event::Commit);
        Ok(())
    }
}
