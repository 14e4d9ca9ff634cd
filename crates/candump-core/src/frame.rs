use core::fmt::{self, Write};

/// Largest payload of a classic CAN frame.
pub const MAX_DLC: usize = 8;

/// Highest 11-bit identifier.
pub const STANDARD_ID_MAX: u32 = 0x7FF;
/// Highest 29-bit identifier.
pub const EXTENDED_ID_MAX: u32 = 0x1FFF_FFFF;

/// Capacity of one formatted line, newline included.
///
/// `twai ` + 8 identifier columns + ` [8]` + 8 * ` xx` + `\n` = 42.
pub const LINE_CAPACITY: usize = 48;

/// A formatted output line.
pub type Line = heapless::String<LINE_CAPACITY>;

/// Frame identifier in either addressing mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Id {
    Standard(u16),
    Extended(u32),
}

impl Id {
    /// Builds an 11-bit identifier, `None` if `raw` does not fit.
    pub const fn standard(raw: u16) -> Option<Self> {
        if raw as u32 <= STANDARD_ID_MAX {
            Some(Self::Standard(raw))
        } else {
            None
        }
    }

    /// Builds a 29-bit identifier, `None` if `raw` does not fit.
    pub const fn extended(raw: u32) -> Option<Self> {
        if raw <= EXTENDED_ID_MAX {
            Some(Self::Extended(raw))
        } else {
            None
        }
    }

    pub const fn raw(self) -> u32 {
        match self {
            Self::Standard(id) => id as u32,
            Self::Extended(id) => id,
        }
    }

    pub const fn is_extended(self) -> bool {
        matches!(self, Self::Extended(_))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct InvalidDlc(pub usize);

/// A received frame.
///
/// For a data frame the payload length is the data-length code; bytes past it
/// are never exposed. A remote frame carries a DLC but no payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Frame {
    id: Id,
    dlc: u8,
    remote: bool,
    data: [u8; MAX_DLC],
}

impl Frame {
    /// Builds a frame from its identifier and payload.
    pub fn new(id: Id, payload: &[u8]) -> Result<Self, InvalidDlc> {
        if payload.len() > MAX_DLC {
            return Err(InvalidDlc(payload.len()));
        }
        let mut data = [0u8; MAX_DLC];
        data[..payload.len()].copy_from_slice(payload);
        Ok(Self { id, dlc: payload.len() as u8, remote: false, data })
    }

    /// Builds a remote (RTR) frame requesting `dlc` bytes.
    pub fn remote(id: Id, dlc: u8) -> Result<Self, InvalidDlc> {
        if dlc as usize > MAX_DLC {
            return Err(InvalidDlc(dlc as usize));
        }
        Ok(Self { id, dlc, remote: true, data: [0; MAX_DLC] })
    }

    pub fn id(&self) -> Id {
        self.id
    }

    pub fn dlc(&self) -> u8 {
        self.dlc
    }

    pub fn is_remote(&self) -> bool {
        self.remote
    }

    /// Payload bytes; always empty for a remote frame.
    pub fn data(&self) -> &[u8] {
        if self.remote {
            return &[];
        }
        &self.data[..self.dlc as usize]
    }

    /// Renders the frame the way `candump` prints it, newline included.
    pub fn to_line(&self) -> Line {
        let mut line = Line::new();
        // LINE_CAPACITY covers the widest frame, so this cannot overflow.
        let _ = writeln!(line, "{}", self.display());
        line
    }

    /// `Display` adaptor for the candump line, without the newline.
    pub fn display(&self) -> DisplayFrame<'_> {
        DisplayFrame(self)
    }
}

/// Formats a frame as `twai <id:>8x> [<dlc>] xx xx ...`. A remote frame
/// prints its DLC and no byte groups.
pub struct DisplayFrame<'a>(&'a Frame);

impl fmt::Display for DisplayFrame<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let frame = self.0;
        write!(f, "twai {:8x} [{}]", frame.id.raw(), frame.dlc)?;
        for byte in frame.data() {
            write!(f, " {:02x}", byte)?;
        }
        Ok(())
    }
}
