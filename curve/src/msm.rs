use crate::group::{window_table, Group, ScalarBits};

/// Compute a * P + b * Q with one shared doubling chain (Straus/Shamir)
/// and a 4-bit window table per base.
pub fn double_scalar_mul<G: Group, S: ScalarBits>(a: &S, p: &G, b: &S, q: &G) -> G {
    let p_table = window_table(p);
    let q_table = window_table(q);

    let a_limbs = a.to_u64_limbs();
    let b_limbs = b.to_u64_limbs();
    let mut result = G::identity(p.curve());

    for limb_idx in (0..4).rev() {
        let a_limb = a_limbs[limb_idx];
        let b_limb = b_limbs[limb_idx];
        for shift in (0..64).step_by(4).rev() {
            for _ in 0..4 {
                result = result.double();
            }

            let a_window = ((a_limb >> shift) & 0xF) as usize;
            if a_window != 0 {
                result += p_table[a_window];
            }

            let b_window = ((b_limb >> shift) & 0xF) as usize;
            if b_window != 0 {
                result += q_table[b_window];
            }
        }
    }

    result
}
