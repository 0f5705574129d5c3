//! Command definitions
//!
//! One variant per daemon capability this crate speaks. Each command knows
//! its opcode, its pigpio mnemonic and how its response is laid out.

use std::fmt;

/// How a response is framed after its 16-byte header
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResponseShape {
    /// Nothing follows the header
    Plain,

    /// A positive result is the byte count of data following the header
    Extended,
}

/// The four 32-bit slots of a packet header
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeaderField {
    Command,
    Param1,
    Param2,
    /// Third parameter / extension length on requests, result on responses
    Result,
}

macro_rules! commands {
    ($( $(#[$doc:meta])* $variant:ident = $opcode:literal, $mnemonic:literal, $shape:ident; )*) => {
        /// Command opcodes understood by the daemon
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        #[repr(u32)]
        pub enum Command {
            $( $(#[$doc])* $variant = $opcode, )*
        }

        impl Command {
            /// Every supported command, in opcode order
            pub const ALL: &'static [Command] = &[ $( Command::$variant, )* ];

            /// Look up a command by its wire opcode
            pub fn from_opcode(opcode: u32) -> Option<Command> {
                match opcode {
                    $( $opcode => Some(Command::$variant), )*
                    _ => None,
                }
            }

            /// The pigpio mnemonic (`MODES`, `I2CRB`, ...)
            pub fn mnemonic(self) -> &'static str {
                match self {
                    $( Command::$variant => $mnemonic, )*
                }
            }

            /// How the daemon frames this command's response
            pub fn response_shape(self) -> ResponseShape {
                match self {
                    $( Command::$variant => ResponseShape::$shape, )*
                }
            }
        }
    };
}

commands! {
    SetMode = 0, "MODES", Plain;
    GetMode = 1, "MODEG", Plain;
    SetPullUpDown = 2, "PUD", Plain;
    Read = 3, "READ", Plain;
    Write = 4, "WRITE", Plain;
    SetPwmDutyCycle = 5, "PWM", Plain;
    SetPwmRange = 6, "PRS", Plain;
    SetPwmFrequency = 7, "PFS", Plain;
    ReadBank1 = 10, "BR1", Plain;
    ReadBank2 = 11, "BR2", Plain;
    ClearBank1 = 12, "BC1", Plain;
    ClearBank2 = 13, "BC2", Plain;
    SetBank1 = 14, "BS1", Plain;
    SetBank2 = 15, "BS2", Plain;
    Tick = 16, "TICK", Plain;
    HardwareRevision = 17, "HWVER", Plain;
    GetPwmRange = 22, "PRG", Plain;
    GetPwmFrequency = 23, "PFG", Plain;
    GetPwmRealRange = 24, "PRRG", Plain;
    Version = 26, "PIGPV", Plain;
    Trigger = 37, "TRIG", Plain;
    I2cOpen = 54, "I2CO", Plain;
    I2cClose = 55, "I2CC", Plain;
    I2cReadDevice = 56, "I2CRD", Extended;
    I2cWriteDevice = 57, "I2CWD", Plain;
    I2cWriteQuick = 58, "I2CWQ", Plain;
    I2cReadByte = 59, "I2CRS", Plain;
    I2cWriteByte = 60, "I2CWS", Plain;
    I2cReadByteData = 61, "I2CRB", Plain;
    I2cWriteByteData = 62, "I2CWB", Plain;
    I2cReadWordData = 63, "I2CRW", Plain;
    I2cWriteWordData = 64, "I2CWW", Plain;
    I2cReadBlockData = 65, "I2CRK", Extended;
    I2cWriteBlockData = 66, "I2CWK", Plain;
    I2cReadI2cBlockData = 67, "I2CRI", Extended;
    I2cWriteI2cBlockData = 68, "I2CWI", Plain;
    I2cProcessCall = 69, "I2CPC", Plain;
    SpiOpen = 71, "SPIO", Plain;
    SpiClose = 72, "SPIC", Plain;
    SpiRead = 73, "SPIR", Extended;
    SpiWrite = 74, "SPIW", Plain;
    SpiXfer = 75, "SPIX", Extended;
    SerialOpen = 76, "SERO", Plain;
    SerialClose = 77, "SERC", Plain;
    SerialReadByte = 78, "SERRB", Plain;
    SerialWriteByte = 79, "SERWB", Plain;
    SerialRead = 80, "SERR", Extended;
    SerialWrite = 81, "SERW", Plain;
    SerialDataAvailable = 82, "SERDA", Plain;
    GetPwmDutyCycle = 83, "GDC", Plain;
}

impl Command {
    /// Wire opcode
    pub fn opcode(self) -> u32 {
        self as u32
    }

    /// Header field carrying this command's output value.
    ///
    /// The reference daemon places every scalar output in the result slot,
    /// including READ's level, but callers go through this lookup rather
    /// than assuming it.
    pub fn value_field(self) -> HeaderField {
        HeaderField::Result
    }

    /// True when the result slot holds a full unsigned 32-bit value.
    ///
    /// These commands cannot fail, so a set top bit is data, not an error
    /// code.
    pub fn unsigned_result(self) -> bool {
        matches!(
            self,
            Command::Tick | Command::HardwareRevision | Command::ReadBank1 | Command::ReadBank2
        )
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.mnemonic())
    }
}
