/// Strict majority of the owners present at evaluation time.
///
/// Confirmations are counted as recorded, including those left by owners who
/// have since been removed.
pub fn is_satisfied(confirmations: u32, owner_count: u32) -> bool {
    2 * u64::from(confirmations) > u64::from(owner_count)
}

pub fn required_confirmations(owner_count: u32) -> u32 {
    owner_count / 2 + 1
}
