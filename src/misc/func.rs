use rand::Rng;
use std::fmt::Debug;
use std::ops::AddAssign;

/// Convert a Vector to a printable string
///
/// # Example
///
/// ```rust
/// # use nbmix::misc::vec_to_string;
/// let xs: Vec<u8> = vec![0, 1, 2, 3, 4, 5];
///
/// assert_eq!(vec_to_string(&xs, 6).as_str(), "[0, 1, 2, 3, 4, 5]");
/// assert_eq!(vec_to_string(&xs, 5).as_str(), "[0, 1, 2, 3, ... , 5]");
///
/// ```
pub fn vec_to_string<T: Debug>(xs: &[T], max_entries: usize) -> String {
    let mut out = String::new();
    out += "[";
    let n = xs.len();
    xs.iter().enumerate().for_each(|(i, x)| {
        let to_push = if i < max_entries - 1 && i < n - 1 {
            format!("{:?}, ", x)
        } else if i == (max_entries - 1) && n > max_entries {
            String::from("... , ")
        } else if i == n - 1 {
            format!("{:?}]", x)
        } else {
            String::new()
        };

        out.push_str(to_push.as_str());
    });

    if n == 0 {
        out.push(']');
    }

    out
}

/// Cumulative sum of `xs`
///
/// # Example
///
/// ```rust
/// # use nbmix::misc::cumsum;
/// let xs: Vec<i32> = vec![1, 1, 2, 1];
/// assert_eq!(cumsum(&xs), vec![1, 2, 4, 5]);
/// ```
pub fn cumsum<T>(xs: &[T]) -> Vec<T>
where
    T: AddAssign + Copy + Default,
{
    xs.iter()
        .scan(T::default(), |acc, &x| {
            *acc += x;
            Some(*acc)
        })
        .collect()
}

/// Index of the first cumulative weight strictly greater than `r`.
///
/// If rounding leaves the total mass just under `r`, the last index is
/// returned.
#[inline]
pub fn catflip(cws: &[f64], r: f64) -> usize {
    cws.iter()
        .position(|&w| w > r)
        .unwrap_or_else(|| cws.len().saturating_sub(1))
}

/// Draw `n` indices in proportion to the normalized `weights`
///
/// Each draw takes a uniform `r` in [0, 1) and scans the running sum of
/// `weights` in index order.
///
/// # Example
///
/// ```rust
/// # use nbmix::misc::pflip;
/// use rand::SeedableRng;
/// use rand::rngs::SmallRng;
///
/// let mut rng = SmallRng::seed_from_u64(0x1234);
/// let ixs = pflip(&[0.0, 1.0, 0.0], 10, &mut rng);
///
/// assert!(ixs.iter().all(|&ix| ix == 1));
/// ```
pub fn pflip<R: Rng>(weights: &[f64], n: usize, rng: &mut R) -> Vec<usize> {
    let cws: Vec<f64> = cumsum(weights);
    (0..n)
        .map(|_| {
            let r: f64 = rng.gen();
            catflip(&cws, r)
        })
        .collect()
}

/// Normalize `xs` in place so that they sum to one
pub(crate) fn normalize(xs: &mut [f64]) {
    let sum: f64 = xs.iter().sum();
    xs.iter_mut().for_each(|x| *x /= sum);
}

/// Independent uniform draws normalized to sum to one.
///
/// A draw of all zeros (vanishingly unlikely) falls back to uniform weights.
pub fn random_weights<R: Rng>(k: usize, rng: &mut R) -> Vec<f64> {
    let mut ws: Vec<f64> = (0..k).map(|_| rng.gen::<f64>()).collect();
    if ws.iter().sum::<f64>() > 0.0 {
        normalize(&mut ws);
        ws
    } else {
        vec![1.0 / k as f64; k]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_xoshiro::Xoshiro256Plus;

    const TOL: f64 = 1E-12;

    #[test]
    fn catflip_picks_first_strictly_greater() {
        let cws = vec![0.25, 0.5, 1.0];
        assert_eq!(catflip(&cws, 0.0), 0);
        assert_eq!(catflip(&cws, 0.25), 1);
        assert_eq!(catflip(&cws, 0.49), 1);
        assert_eq!(catflip(&cws, 0.75), 2);
    }

    #[test]
    fn catflip_falls_back_to_last_on_rounding_shortfall() {
        let cws = vec![0.3, 0.6, 0.999_999_999_9];
        assert_eq!(catflip(&cws, 0.999_999_999_95), 2);
    }

    #[test]
    fn pflip_returns_n_indices_in_range() {
        let mut rng = Xoshiro256Plus::seed_from_u64(0xABCD);
        let ixs = pflip(&[0.2, 0.3, 0.5], 500, &mut rng);
        assert_eq!(ixs.len(), 500);
        assert!(ixs.iter().all(|&ix| ix < 3));
        assert!((0..3).all(|k| ixs.contains(&k)));
    }

    #[test]
    fn random_weights_sum_to_one() {
        let mut rng = Xoshiro256Plus::seed_from_u64(0x1234);
        for k in 1..20 {
            let ws = random_weights(k, &mut rng);
            assert_eq!(ws.len(), k);
            assert::close(ws.iter().sum::<f64>(), 1.0, TOL);
            assert!(ws.iter().all(|&w| w >= 0.0));
        }
    }

    #[test]
    fn vec_to_string_short_and_empty() {
        let xs: Vec<u8> = vec![1, 2];
        assert_eq!(vec_to_string(&xs, 5), "[1, 2]");
        let empty: Vec<u8> = vec![];
        assert_eq!(vec_to_string(&empty, 5), "[]");
    }
}
