use honggfuzz::fuzz;
use tilepack::{decode, encode, WidthPattern};

// First byte picks the pattern length, the next bytes the widths, the rest is
// the packed stream.
fn main() {
    loop {
        fuzz!(|data: &[u8]| {
            let Some((&n, rest)) = data.split_first() else { return };
            let n = (n as usize % 8 + 1).min(rest.len());
            let (widths, bytes) = rest.split_at(n);
            let Ok(pattern) = WidthPattern::new(widths.to_vec()) else { return };
            let values = decode(&pattern, bytes).expect("whole-buffer decode cannot run short");
            let packed = encode(&pattern, &values).expect("decoded values fit their slots");
            assert!(packed.len() <= bytes.len());
        });
    }
}
