use rand::Rng;

const LETTERS: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ";

/// Plate label of the form `LLDDD`, e.g. `KX042`.
pub fn generate_plate<R: Rng + ?Sized>(rng: &mut R) -> String {
    let mut plate = String::with_capacity(5);
    for _ in 0..2 {
        plate.push(LETTERS[rng.gen_range(0..LETTERS.len())] as char);
    }
    for _ in 0..3 {
        plate.push(char::from(b'0' + rng.gen_range(0..10u8)));
    }
    plate
}
