#![no_main]

use libfuzzer_sys::fuzz_target;

use fibdev_core::{FibDevice, Whence, FIB_TABLE, MAX_INDEX};

// Each 9-byte chunk is one seek: a whence byte and an i64 offset. The cursor
// must follow a saturating, clamped model and reads must match the table.
fuzz_target!(|data: &[u8]| {
    let device = FibDevice::new();
    let Ok(mut session) = device.open() else {
        return;
    };
    let mut model: i128 = 0;

    for chunk in data.chunks_exact(9) {
        let whence = match chunk[0] % 3 {
            0 => Whence::Set,
            1 => Whence::Cur,
            _ => Whence::End,
        };
        let mut bytes = [0u8; 8];
        bytes.copy_from_slice(&chunk[1..]);
        let offset = i64::from_le_bytes(bytes);

        let max = i128::from(MAX_INDEX);
        let target = match whence {
            Whence::Set => i128::from(offset),
            Whence::Cur => model + i128::from(offset),
            Whence::End => max - i128::from(offset),
        };
        model = target.clamp(0, max);

        let cursor = session.seek(offset, whence);
        assert_eq!(i128::from(cursor), model);
        assert_eq!(session.read(), FIB_TABLE[cursor as usize]);
    }

    session.close();
    assert!(!device.is_busy());
});
