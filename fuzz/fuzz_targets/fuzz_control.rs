#![no_main]

use libfuzzer_sys::fuzz_target;

use fibdev_core::{ControlAttribute, FibDevice, MAX_INDEX};

fuzz_target!(|data: &[u8]| {
    let device = FibDevice::new();
    for attr in ControlAttribute::ALL {
        match attr.store(&device, data) {
            Ok(consumed) => assert_eq!(consumed, data.len()),
            Err(_) => assert!(data.is_empty()),
        }
    }

    let method: u32 = ControlAttribute::FibMethod
        .show(&device)
        .trim_end()
        .parse()
        .expect("fib_method shows a number");
    assert!(method <= 3);

    // Reads still succeed whatever was written.
    let mut session = device.open().expect("fresh device is free");
    session.seek(i64::from(MAX_INDEX), fibdev_core::Whence::Set);
    assert!(session.read() > 0);
});
