use rand::RngCore;
use rand::rngs::OsRng;

const HEX: &[u8; 16] = b"0123456789abcdef";

/// Generates a version 4 UUID string for a new order.
///
/// Every hex digit is drawn from its own OS-sourced random byte. The
/// version digit is fixed to `4` and the variant digit is one of `8`, `9`,
/// `a`, `b`.
pub fn new_order_id() -> String {
    let mut rng = OsRng;
    let mut id = String::with_capacity(36);

    push_random(&mut rng, &mut id, 8);
    id.push('-');
    push_random(&mut rng, &mut id, 4);
    id.push('-');
    id.push('4');
    push_random(&mut rng, &mut id, 3);
    id.push('-');
    id.push(variant_digit(&mut rng));
    push_random(&mut rng, &mut id, 3);
    id.push('-');
    push_random(&mut rng, &mut id, 12);

    id
}

fn random_nibble<R: RngCore>(rng: &mut R) -> usize {
    let mut byte = [0u8; 1];
    rng.fill_bytes(&mut byte);
    usize::from(byte[0] >> 4)
}

fn push_random<R: RngCore>(rng: &mut R, id: &mut String, digits: usize) {
    for _ in 0..digits {
        id.push(char::from(HEX[random_nibble(rng)]));
    }
}

fn variant_digit<R: RngCore>(rng: &mut R) -> char {
    char::from(HEX[random_nibble(rng) % 4 + 8])
}
