//! Daemon error codes
//!
//! The daemon reports failure as a negative result. [`ErrorCode::from_code`]
//! maps the number to its symbolic name and description; numbers outside the
//! table resolve to [`ErrorCode::Unknown`] so lookup never fails.

use std::fmt;

use thiserror::Error;

use crate::protocol::Command;

macro_rules! error_codes {
    ($( $variant:ident = $code:literal, $name:literal, $message:literal; )*) => {
        /// Negative result codes returned by the daemon
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub enum ErrorCode {
            $( $variant, )*
            /// A code missing from the table, kept verbatim
            Unknown(i32),
        }

        impl ErrorCode {
            /// Every known code, in table order
            pub const KNOWN: &'static [ErrorCode] = &[ $( ErrorCode::$variant, )* ];

            /// Exact-match lookup; never fails
            pub fn from_code(code: i32) -> ErrorCode {
                match code {
                    $( $code => ErrorCode::$variant, )*
                    other => ErrorCode::Unknown(other),
                }
            }

            /// The raw numeric code
            pub fn code(self) -> i32 {
                match self {
                    $( ErrorCode::$variant => $code, )*
                    ErrorCode::Unknown(code) => code,
                }
            }

            /// Symbolic name as the daemon documents it
            pub fn name(self) -> &'static str {
                match self {
                    $( ErrorCode::$variant => $name, )*
                    ErrorCode::Unknown(_) => "PI_UNKNOWN_ERROR",
                }
            }

            /// Human-readable description
            pub fn message(self) -> &'static str {
                match self {
                    $( ErrorCode::$variant => $message, )*
                    ErrorCode::Unknown(_) => "unknown error",
                }
            }
        }
    };
}

error_codes! {
    InitFailed = -1, "PI_INIT_FAILED", "gpioInitialise failed";
    BadUserGpio = -2, "PI_BAD_USER_GPIO", "GPIO not 0-31";
    BadGpio = -3, "PI_BAD_GPIO", "GPIO not 0-53";
    BadMode = -4, "PI_BAD_MODE", "mode not 0-7";
    BadLevel = -5, "PI_BAD_LEVEL", "level not 0-1";
    BadPud = -6, "PI_BAD_PUD", "pud not 0-2";
    BadPulsewidth = -7, "PI_BAD_PULSEWIDTH", "pulsewidth not 0 or 500-2500";
    BadDutycycle = -8, "PI_BAD_DUTYCYCLE", "dutycycle outside set range";
    BadTimer = -9, "PI_BAD_TIMER", "timer not 0-9";
    BadMs = -10, "PI_BAD_MS", "ms not 10-60000";
    BadTimetype = -11, "PI_BAD_TIMETYPE", "timetype not 0-1";
    BadSeconds = -12, "PI_BAD_SECONDS", "seconds < 0";
    BadMicros = -13, "PI_BAD_MICROS", "micros not 0-999999";
    TimerFailed = -14, "PI_TIMER_FAILED", "gpioSetTimerFunc failed";
    BadWdogTimeout = -15, "PI_BAD_WDOG_TIMEOUT", "timeout not 0-60000";
    NoAlertFunc = -16, "PI_NO_ALERT_FUNC", "DEPRECATED";
    BadClkPeriph = -17, "PI_BAD_CLK_PERIPH", "clock peripheral not 0-1";
    BadClkSource = -18, "PI_BAD_CLK_SOURCE", "DEPRECATED";
    BadClkMicros = -19, "PI_BAD_CLK_MICROS", "clock micros not 1, 2, 4, 5, 8, or 10";
    BadBufMillis = -20, "PI_BAD_BUF_MILLIS", "buf millis not 100-10000";
    BadDutyrange = -21, "PI_BAD_DUTYRANGE", "dutycycle range not 25-40000";
    BadSignum = -22, "PI_BAD_SIGNUM", "signum not 0-63";
    BadPathname = -23, "PI_BAD_PATHNAME", "can't open pathname";
    NoHandle = -24, "PI_NO_HANDLE", "no handle available";
    BadHandle = -25, "PI_BAD_HANDLE", "unknown handle";
    BadIfFlags = -26, "PI_BAD_IF_FLAGS", "ifFlags > 4";
    BadChannel = -27, "PI_BAD_CHANNEL", "DMA channel not 0-15";
    BadSocketPort = -28, "PI_BAD_SOCKET_PORT", "socket port not 1024-32000";
    BadFifoCommand = -29, "PI_BAD_FIFO_COMMAND", "unrecognized fifo command";
    BadSecoChannel = -30, "PI_BAD_SECO_CHANNEL", "DMA secondary channel not 0-15";
    NotInitialised = -31, "PI_NOT_INITIALISED", "function called before gpioInitialise";
    Initialised = -32, "PI_INITIALISED", "function called after gpioInitialise";
    BadWaveMode = -33, "PI_BAD_WAVE_MODE", "waveform mode not 0-3";
    BadCfgInternal = -34, "PI_BAD_CFG_INTERNAL", "bad parameter in gpioCfgInternals call";
    BadWaveBaud = -35, "PI_BAD_WAVE_BAUD", "baud rate not 50-250K(RX)/50-1M(TX)";
    TooManyPulses = -36, "PI_TOO_MANY_PULSES", "waveform has too many pulses";
    TooManyChars = -37, "PI_TOO_MANY_CHARS", "waveform has too many chars";
    NotSerialGpio = -38, "PI_NOT_SERIAL_GPIO", "no bit bang serial read on GPIO";
    BadSerialStruc = -39, "PI_BAD_SERIAL_STRUC", "bad (null) serial structure parameter";
    BadSerialBuf = -40, "PI_BAD_SERIAL_BUF", "bad (null) serial buf parameter";
    NotPermitted = -41, "PI_NOT_PERMITTED", "GPIO operation not permitted";
    SomePermitted = -42, "PI_SOME_PERMITTED", "one or more GPIO not permitted";
    BadWvscCommnd = -43, "PI_BAD_WVSC_COMMND", "bad WVSC subcommand";
    BadWvsmCommnd = -44, "PI_BAD_WVSM_COMMND", "bad WVSM subcommand";
    BadWvspCommnd = -45, "PI_BAD_WVSP_COMMND", "bad WVSP subcommand";
    BadPulselen = -46, "PI_BAD_PULSELEN", "trigger pulse length not 1-100";
    BadScript = -47, "PI_BAD_SCRIPT", "invalid script";
    BadScriptId = -48, "PI_BAD_SCRIPT_ID", "unknown script id";
    BadSerOffset = -49, "PI_BAD_SER_OFFSET", "add serial data offset > 30 minutes";
    GpioInUse = -50, "PI_GPIO_IN_USE", "GPIO already in use";
    BadSerialCount = -51, "PI_BAD_SERIAL_COUNT", "must read at least a byte at a time";
    BadParamNum = -52, "PI_BAD_PARAM_NUM", "script parameter id not 0-9";
    DupTag = -53, "PI_DUP_TAG", "script has duplicate tag";
    TooManyTags = -54, "PI_TOO_MANY_TAGS", "script has too many tags";
    BadScriptCmd = -55, "PI_BAD_SCRIPT_CMD", "illegal script command";
    BadVarNum = -56, "PI_BAD_VAR_NUM", "script variable id not 0-149";
    NoScriptRoom = -57, "PI_NO_SCRIPT_ROOM", "no more room for scripts";
    NoMemory = -58, "PI_NO_MEMORY", "can't allocate temporary memory";
    SockReadFailed = -59, "PI_SOCK_READ_FAILED", "socket read failed";
    SockWritFailed = -60, "PI_SOCK_WRIT_FAILED", "socket write failed";
    TooManyParam = -61, "PI_TOO_MANY_PARAM", "too many script parameters (> 10)";
    ScriptNotReady = -62, "PI_SCRIPT_NOT_READY", "script initialising";
    BadTag = -63, "PI_BAD_TAG", "script has unresolved tag";
    BadMicsDelay = -64, "PI_BAD_MICS_DELAY", "bad MICS delay (too large)";
    BadMilsDelay = -65, "PI_BAD_MILS_DELAY", "bad MILS delay (too large)";
    BadWaveId = -66, "PI_BAD_WAVE_ID", "non existent wave id";
    TooManyCbs = -67, "PI_TOO_MANY_CBS", "No more CBs for waveform";
    TooManyOol = -68, "PI_TOO_MANY_OOL", "No more OOL for waveform";
    EmptyWaveform = -69, "PI_EMPTY_WAVEFORM", "attempt to create an empty waveform";
    NoWaveformId = -70, "PI_NO_WAVEFORM_ID", "no more waveforms";
    I2cOpenFailed = -71, "PI_I2C_OPEN_FAILED", "can't open I2C device";
    SerOpenFailed = -72, "PI_SER_OPEN_FAILED", "can't open serial device";
    SpiOpenFailed = -73, "PI_SPI_OPEN_FAILED", "can't open SPI device";
    BadI2cBus = -74, "PI_BAD_I2C_BUS", "bad I2C bus";
    BadI2cAddr = -75, "PI_BAD_I2C_ADDR", "bad I2C address";
    BadSpiChannel = -76, "PI_BAD_SPI_CHANNEL", "bad SPI channel";
    BadFlags = -77, "PI_BAD_FLAGS", "bad i2c/spi/ser open flags";
    BadSpiSpeed = -78, "PI_BAD_SPI_SPEED", "bad SPI speed";
    BadSerDevice = -79, "PI_BAD_SER_DEVICE", "bad serial device name";
    BadSerSpeed = -80, "PI_BAD_SER_SPEED", "bad serial baud rate";
    BadParam = -81, "PI_BAD_PARAM", "bad i2c/spi/ser parameter";
    I2cWriteFailed = -82, "PI_I2C_WRITE_FAILED", "i2c write failed";
    I2cReadFailed = -83, "PI_I2C_READ_FAILED", "i2c read failed";
    BadSpiCount = -84, "PI_BAD_SPI_COUNT", "bad SPI count";
    SerWriteFailed = -85, "PI_SER_WRITE_FAILED", "ser write failed";
    SerReadFailed = -86, "PI_SER_READ_FAILED", "ser read failed";
    SerReadNoData = -87, "PI_SER_READ_NO_DATA", "ser read no data available";
    UnknownCommand = -88, "PI_UNKNOWN_COMMAND", "unknown command";
    SpiXferFailed = -89, "PI_SPI_XFER_FAILED", "spi xfer/read/write failed";
    BadPointer = -90, "PI_BAD_POINTER", "bad (NULL) pointer";
    NoAuxSpi = -91, "PI_NO_AUX_SPI", "no auxiliary SPI on Pi A or B";
    NotPwmGpio = -92, "PI_NOT_PWM_GPIO", "GPIO is not in use for PWM";
    NotServoGpio = -93, "PI_NOT_SERVO_GPIO", "GPIO is not in use for servo pulses";
    NotHclkGpio = -94, "PI_NOT_HCLK_GPIO", "GPIO has no hardware clock";
    NotHpwmGpio = -95, "PI_NOT_HPWM_GPIO", "GPIO has no hardware PWM";
    BadHpwmFreq = -96, "PI_BAD_HPWM_FREQ", "invalid hardware PWM frequency";
    BadHpwmDuty = -97, "PI_BAD_HPWM_DUTY", "hardware PWM dutycycle not 0-1M";
    BadHclkFreq = -98, "PI_BAD_HCLK_FREQ", "invalid hardware clock frequency";
    BadHclkPass = -99, "PI_BAD_HCLK_PASS", "need password to use hardware clock 1";
    HpwmIllegal = -100, "PI_HPWM_ILLEGAL", "illegal, PWM in use for main clock";
    BadDatabits = -101, "PI_BAD_DATABITS", "serial data bits not 1-32";
    BadStopbits = -102, "PI_BAD_STOPBITS", "serial (half) stop bits not 2-8";
    MsgToobig = -103, "PI_MSG_TOOBIG", "socket/pipe message too big";
    BadMallocMode = -104, "PI_BAD_MALLOC_MODE", "bad memory allocation mode";
    TooManySegs = -105, "PI_TOO_MANY_SEGS", "too many I2C transaction segments";
    BadI2cSeg = -106, "PI_BAD_I2C_SEG", "an I2C transaction segment failed";
    BadSmbusCmd = -107, "PI_BAD_SMBUS_CMD", "SMBus command not supported by driver";
    NotI2cGpio = -108, "PI_NOT_I2C_GPIO", "no bit bang I2C in progress on GPIO";
    BadI2cWlen = -109, "PI_BAD_I2C_WLEN", "bad I2C write length";
    BadI2cRlen = -110, "PI_BAD_I2C_RLEN", "bad I2C read length";
    BadI2cCmd = -111, "PI_BAD_I2C_CMD", "bad I2C command";
    BadI2cBaud = -112, "PI_BAD_I2C_BAUD", "bad I2C baud rate, not 50-500k";
    ChainLoopCnt = -113, "PI_CHAIN_LOOP_CNT", "bad chain loop count";
    BadChainLoop = -114, "PI_BAD_CHAIN_LOOP", "empty chain loop";
    ChainCounter = -115, "PI_CHAIN_COUNTER", "too many chain counters";
    BadChainCmd = -116, "PI_BAD_CHAIN_CMD", "bad chain command";
    BadChainDelay = -117, "PI_BAD_CHAIN_DELAY", "bad chain delay micros";
    ChainNesting = -118, "PI_CHAIN_NESTING", "chain counters nested too deeply";
    ChainTooBig = -119, "PI_CHAIN_TOO_BIG", "chain is too long";
    Deprecated = -120, "PI_DEPRECATED", "deprecated function removed";
    BadSerInvert = -121, "PI_BAD_SER_INVERT", "bit bang serial invert not 0 or 1";
    BadEdge = -122, "PI_BAD_EDGE", "bad ISR edge value, not 0-2";
    BadIsrInit = -123, "PI_BAD_ISR_INIT", "bad ISR initialisation";
    BadForever = -124, "PI_BAD_FOREVER", "loop forever must be last command";
    BadFilter = -125, "PI_BAD_FILTER", "bad filter parameter";
    BadPad = -126, "PI_BAD_PAD", "bad pad number";
    BadStrength = -127, "PI_BAD_STRENGTH", "bad pad drive strength";
    FilOpenFailed = -128, "PI_FIL_OPEN_FAILED", "file open failed";
    BadFileMode = -129, "PI_BAD_FILE_MODE", "bad file mode";
    BadFileFlag = -130, "PI_BAD_FILE_FLAG", "bad file flag";
    BadFileRead = -131, "PI_BAD_FILE_READ", "bad file read";
    BadFileWrite = -132, "PI_BAD_FILE_WRITE", "bad file write";
    FileNotRopen = -133, "PI_FILE_NOT_ROPEN", "file not open for read";
    FileNotWopen = -134, "PI_FILE_NOT_WOPEN", "file not open for write";
    BadFileSeek = -135, "PI_BAD_FILE_SEEK", "bad file seek";
    NoFileMatch = -136, "PI_NO_FILE_MATCH", "no files match pattern";
    NoFileAccess = -137, "PI_NO_FILE_ACCESS", "no permission to access file";
    FileIsADir = -138, "PI_FILE_IS_A_DIR", "file is a directory";
    BadShellStatus = -139, "PI_BAD_SHELL_STATUS", "bad shell return status";
    BadScriptName = -140, "PI_BAD_SCRIPT_NAME", "bad script name";
    BadSpiBaud = -141, "PI_BAD_SPI_BAUD", "bad SPI baud rate, not 50-500k";
    NotSpiGpio = -142, "PI_NOT_SPI_GPIO", "no bit bang SPI in progress on GPIO";
    BadEventId = -143, "PI_BAD_EVENT_ID", "bad event id";
    CmdInterrupted = -144, "PI_CMD_INTERRUPTED", "command interrupted, Python";
    NotOnBcm2711 = -145, "PI_NOT_ON_BCM2711", "not available on BCM2711";
    OnlyOnBcm2711 = -146, "PI_ONLY_ON_BCM2711", "only available on BCM2711";
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({}): {}", self.name(), self.code(), self.message())
    }
}

/// A negative result returned by the daemon for a specific command
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("{command} failed: {code}")]
pub struct Fault {
    pub command: Command,
    pub code: ErrorCode,
}

impl Fault {
    pub fn new(command: Command, code: i32) -> Self {
        Self {
            command,
            code: ErrorCode::from_code(code),
        }
    }

    /// True when the code was missing from the table
    pub fn is_unknown(&self) -> bool {
        matches!(self.code, ErrorCode::Unknown(_))
    }
}
