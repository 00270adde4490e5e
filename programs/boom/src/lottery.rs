use anchor_lang::prelude::*;
use anchor_lang::solana_program::hash::hash;

// ─────────────────────────────────────────────────────────────────────────────
// Lottery — seeded Fisher–Yates over depositor positions
// ─────────────────────────────────────────────────────────────────────────────
//
// Depositors are identified by their arrival position (0..n). The seed is
// hashed once before the first draw and re-hashed after every swap:
//
//   h = sha256(seed)
//   for i in (1..n).rev():
//       j = u32_le(h[0..4]) % (i + 1)
//       swap(arr[i], arr[j])
//       h = sha256(h)
//
// The first `min(spots, n)` entries of the shuffled array win. The same
// seed and depositor count always produce the same winner set, so
// `mark_winner` can replay the draw on-chain against the persisted seed.
//
// The seed is the most recent slot hash at finalization. Whoever sends the
// finalizing transaction can influence it, so this is not unbiasable.

/// Shuffles `items` in place with the seeded Fisher–Yates draw.
pub fn shuffle<T>(items: &mut [T], seed: &[u8; 32]) {
    let mut digest = hash(seed).to_bytes();
    for i in (1..items.len()).rev() {
        let draw = u32::from_le_bytes([digest[0], digest[1], digest[2], digest[3]]);
        let j = (draw as usize) % (i + 1);
        items.swap(i, j);
        digest = hash(&digest).to_bytes();
    }
}

/// Number of winners for a round of `depositors` with `spots` lottery spots.
pub fn winner_count(depositors: u32, spots: u32) -> u32 {
    depositors.min(spots)
}

/// Winning depositor positions, in draw order.
pub fn winning_positions(seed: &[u8; 32], depositors: u32, spots: u32) -> Vec<u32> {
    if depositors <= spots {
        return (0..depositors).collect();
    }
    let mut positions: Vec<u32> = (0..depositors).collect();
    shuffle(&mut positions, seed);
    positions.truncate(spots as usize);
    positions
}

pub fn is_winner(seed: &[u8; 32], depositors: u32, spots: u32, position: u32) -> bool {
    if position >= depositors {
        return false;
    }
    if depositors <= spots {
        return true;
    }
    winning_positions(seed, depositors, spots).contains(&position)
}

/// Reads the most recent hash out of the raw `SlotHashes` sysvar data.
///
/// Layout: u64 LE entry count, then `(slot: u64, hash: [u8; 32])` entries,
/// newest first.
pub fn seed_from_slot_hashes(data: &[u8]) -> Result<[u8; 32]> {
    const FIRST_HASH: std::ops::Range<usize> = 16..48;
    let bytes = data
        .get(FIRST_HASH)
        .ok_or(ProgramError::InvalidAccountData)?;
    let mut seed = [0u8; 32];
    seed.copy_from_slice(bytes);
    Ok(seed)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn seed(byte: u8) -> [u8; 32] {
        [byte; 32]
    }

    #[test]
    fn everyone_wins_when_spots_cover_depositors() {
        assert_eq!(winning_positions(&seed(1), 3, 5), vec![0, 1, 2]);
        assert_eq!(winning_positions(&seed(1), 4, 4), vec![0, 1, 2, 3]);
        for position in 0..4 {
            assert!(is_winner(&seed(9), 4, 4, position));
        }
    }

    #[test]
    fn winner_set_size_is_min_of_spots_and_depositors() {
        for depositors in 0..40u32 {
            for spots in 1..10u32 {
                let winners = winning_positions(&seed(7), depositors, spots);
                assert_eq!(winners.len() as u32, winner_count(depositors, spots));
            }
        }
    }

    #[test]
    fn winners_are_distinct_and_in_range() {
        let mut winners = winning_positions(&seed(42), 100, 25);
        assert!(winners.iter().all(|p| *p < 100));
        winners.sort_unstable();
        winners.dedup();
        assert_eq!(winners.len(), 25);
    }

    #[test]
    fn draw_is_deterministic() {
        let a = winning_positions(&seed(3), 64, 8);
        let b = winning_positions(&seed(3), 64, 8);
        assert_eq!(a, b);
    }

    #[test]
    fn different_seeds_shuffle_differently() {
        let mut a: Vec<u32> = (0..64).collect();
        let mut b: Vec<u32> = (0..64).collect();
        shuffle(&mut a, &seed(1));
        shuffle(&mut b, &seed(2));
        assert_ne!(a, b);
    }

    #[test]
    fn shuffle_is_a_permutation() {
        let mut items: Vec<u32> = (0..50).collect();
        shuffle(&mut items, &seed(11));
        let mut sorted = items.clone();
        sorted.sort_unstable();
        assert_eq!(sorted, (0..50).collect::<Vec<u32>>());
    }

    #[test]
    fn first_draw_uses_hash_of_seed() {
        let s = seed(5);
        let digest = hash(&s).to_bytes();
        let draw = u32::from_le_bytes([digest[0], digest[1], digest[2], digest[3]]);
        let j = (draw % 2) as usize;

        let mut items = vec![10u32, 20];
        shuffle(&mut items, &s);
        let expected = if j == 0 { vec![20, 10] } else { vec![10, 20] };
        assert_eq!(items, expected);
    }

    #[test]
    fn is_winner_matches_winning_positions() {
        let s = seed(77);
        let winners = winning_positions(&s, 30, 4);
        for position in 0..30 {
            assert_eq!(is_winner(&s, 30, 4, position), winners.contains(&position));
        }
        assert!(!is_winner(&s, 30, 4, 30));
    }

    #[test]
    fn slot_hash_seed_is_the_newest_entry() {
        let mut data = vec![0u8; 16 + 32 + 40];
        data[0..8].copy_from_slice(&2u64.to_le_bytes());
        data[8..16].copy_from_slice(&1234u64.to_le_bytes());
        data[16..48].copy_from_slice(&[0xAB; 32]);
        assert_eq!(seed_from_slot_hashes(&data).unwrap(), [0xAB; 32]);
        assert!(seed_from_slot_hashes(&data[..20]).is_err());
    }
}
