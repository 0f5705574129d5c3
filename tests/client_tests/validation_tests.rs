//! Argument Validation Tests
//!
//! Out-of-range arguments must fail locally without touching the transport.

#[path = "../common/mod.rs"]
mod common;

use std::sync::atomic::Ordering;

use common::{loopback_client, spy_client};
use pigwire::client::limits::{
    check_duty_cycle, check_duty_cycle_range, check_gpio, check_micros_delay, check_millis_delay,
    check_span, check_trigger_pulse, check_user_gpio, MAX_DUTYCYCLE_RANGE, MAX_GPIO,
    MAX_MICS_DELAY, MAX_MILS_DELAY, MAX_USER_GPIO, MIN_DUTYCYCLE_RANGE,
};
use pigwire::client::{I2cHandle, Level, Mode, Pull, SerialHandle, SpiHandle};
use pigwire::error::ArgumentError;
use pigwire::protocol::MAX_EXTENSION_SIZE;
use pigwire::Error;

fn argument(err: Error) -> ArgumentError {
    match err {
        Error::Argument(arg) => arg,
        other => panic!("Expected argument error, got {:?}", other),
    }
}

// =============================================================================
// Bounds
// =============================================================================

#[test]
fn test_gpio_bounds() {
    assert!(check_gpio(0).is_ok());
    assert!(check_gpio(MAX_GPIO).is_ok());
    assert!(check_gpio(MAX_GPIO + 1).is_err());

    assert!(check_user_gpio(MAX_USER_GPIO).is_ok());
    assert!(check_user_gpio(MAX_USER_GPIO + 1).is_err());
}

#[test]
fn test_duty_cycle_bounds() {
    assert!(check_duty_cycle(0).is_ok());
    assert!(check_duty_cycle(MAX_DUTYCYCLE_RANGE).is_ok());
    assert!(check_duty_cycle(MAX_DUTYCYCLE_RANGE + 1).is_err());

    assert!(check_duty_cycle_range(MIN_DUTYCYCLE_RANGE - 1).is_err());
    assert!(check_duty_cycle_range(MIN_DUTYCYCLE_RANGE).is_ok());
    assert!(check_duty_cycle_range(MAX_DUTYCYCLE_RANGE).is_ok());
    assert!(check_duty_cycle_range(MAX_DUTYCYCLE_RANGE + 1).is_err());
}

#[test]
fn test_delay_and_pulse_bounds() {
    assert!(check_micros_delay(MAX_MICS_DELAY).is_ok());
    assert!(check_micros_delay(MAX_MICS_DELAY + 1).is_err());
    assert!(check_millis_delay(MAX_MILS_DELAY).is_ok());
    assert!(check_millis_delay(MAX_MILS_DELAY + 1).is_err());

    assert!(check_trigger_pulse(0).is_err());
    assert!(check_trigger_pulse(1).is_ok());
    assert!(check_trigger_pulse(100).is_ok());
    assert!(check_trigger_pulse(101).is_err());
}

#[test]
fn test_span_bounds() {
    assert!(check_span(0, 4, 4).is_ok());
    assert!(check_span(2, 2, 4).is_ok());
    assert!(check_span(0, 0, 0).is_ok());
    assert!(check_span(3, 2, 4).is_err());
    assert!(check_span(usize::MAX, 1, 4).is_err());
}

#[test]
fn test_argument_error_describes_bounds() {
    let err = argument(check_gpio(99).unwrap_err());

    assert_eq!(err.name, "gpio");
    assert_eq!(err.value, 99);
    assert_eq!((err.min, err.max), (0, 53));
    assert!(err.to_string().contains("99"));
}

// =============================================================================
// No I/O on Invalid Arguments
// =============================================================================

#[test]
fn test_set_mode_out_of_range_sends_nothing() {
    let (pi, daemon, writes) = loopback_client();

    let err = pi.set_mode(99, Mode::Output).unwrap_err();

    assert!(err.is_argument());
    assert_eq!(writes.load(Ordering::SeqCst), 0);
    assert!(daemon.lock().requests.is_empty());
}

#[test]
fn test_negative_pin_is_rejected() {
    let (pi, spy) = spy_client();

    // A negative pin reinterpreted as u32 lands far above the range
    assert!(pi.write(-1i32 as u32, Level::High).unwrap_err().is_argument());
    assert_eq!(spy.sent_count(), 0);
}

#[test]
fn test_gpio_operations_validate_pin() {
    let (pi, spy) = spy_client();

    assert!(pi.get_mode(54).unwrap_err().is_argument());
    assert!(pi.set_pull_up_down(54, Pull::Up).unwrap_err().is_argument());
    assert!(pi.read(54).unwrap_err().is_argument());
    assert!(pi.write(54, Level::Low).unwrap_err().is_argument());
    assert!(pi.trigger(32, 10, Level::High).unwrap_err().is_argument());
    assert!(pi.trigger(4, 0, Level::High).unwrap_err().is_argument());
    assert_eq!(spy.sent_count(), 0);

    assert!(pi.read(53).is_ok());
    assert_eq!(spy.sent_count(), 1);
}

#[test]
fn test_pwm_operations_validate() {
    let (pi, spy) = spy_client();

    assert!(pi.set_pwm_duty_cycle(32, 10).unwrap_err().is_argument());
    assert!(pi.set_pwm_duty_cycle(4, 40_001).unwrap_err().is_argument());
    assert!(pi.get_pwm_duty_cycle(32).unwrap_err().is_argument());
    assert!(pi.set_pwm_range(4, 24).unwrap_err().is_argument());
    assert!(pi.set_pwm_range(4, 40_001).unwrap_err().is_argument());
    assert!(pi.get_pwm_range(40).unwrap_err().is_argument());
    assert!(pi.set_pwm_frequency(40, 800).unwrap_err().is_argument());
    assert_eq!(spy.sent_count(), 0);
}

#[test]
fn test_delays_validate() {
    let (pi, spy) = spy_client();

    assert!(pi.delay_micros(MAX_MICS_DELAY + 1).unwrap_err().is_argument());
    assert!(pi.delay_millis(MAX_MILS_DELAY + 1).unwrap_err().is_argument());
    assert_eq!(spy.sent_count(), 0);
}

#[test]
fn test_peripheral_operations_validate() {
    let (pi, spy) = spy_client();
    let handle = I2cHandle(0);

    assert!(pi.i2c_open(1, 0x80).unwrap_err().is_argument());
    assert!(pi.i2c_write_block_data(handle, 0, &[]).unwrap_err().is_argument());
    assert!(pi.i2c_write_block_data(handle, 0, &[0u8; 33]).unwrap_err().is_argument());
    assert!(pi.i2c_read_i2c_block_data(handle, 0, 0).unwrap_err().is_argument());
    assert!(pi.i2c_read_i2c_block_data(handle, 0, 33).unwrap_err().is_argument());
    assert!(pi.i2c_write_i2c_block_data(handle, 0, &[0u8; 33]).unwrap_err().is_argument());

    assert!(pi.spi_open(3, 1_000_000, 0).unwrap_err().is_argument());
    assert!(pi.spi_open(0, 31_999, 0).unwrap_err().is_argument());
    assert!(pi.spi_open(0, 125_000_001, 0).unwrap_err().is_argument());

    assert!(pi.serial_open("", 9600).unwrap_err().is_argument());
    assert!(pi.serial_open("/dev/ttyAMA0", 49).unwrap_err().is_argument());
    assert!(pi.serial_open("/dev/ttyAMA0", 250_001).unwrap_err().is_argument());

    assert_eq!(spy.sent_count(), 0);
}

#[test]
fn test_oversized_payload_is_rejected() {
    let (pi, spy) = spy_client();
    let huge = vec![0u8; MAX_EXTENSION_SIZE as usize + 1];

    let arg = argument(pi.spi_write(SpiHandle(0), &huge).unwrap_err());
    assert_eq!(arg.value, i64::from(MAX_EXTENSION_SIZE) + 1);
    assert_eq!(arg.max, i64::from(MAX_EXTENSION_SIZE));
    assert!(pi.spi_xfer(SpiHandle(0), &huge).unwrap_err().is_argument());
    assert!(pi.serial_write(SerialHandle(0), &huge).unwrap_err().is_argument());
    assert!(pi.i2c_write_device(I2cHandle(0), &huge).unwrap_err().is_argument());

    assert_eq!(spy.sent_count(), 0);
}

#[test]
#[cfg(target_pointer_width = "64")]
fn test_read_counts_must_fit_header_slot() {
    let (pi, spy) = spy_client();
    let count = u32::MAX as usize + 1;

    let arg = argument(pi.i2c_read_device(I2cHandle(0), count).unwrap_err());
    assert_eq!(arg.max, i64::from(u32::MAX));
    assert!(pi.spi_read(SpiHandle(0), count).unwrap_err().is_argument());
    assert!(pi.serial_read(SerialHandle(0), count).unwrap_err().is_argument());

    assert_eq!(spy.sent_count(), 0);
}
