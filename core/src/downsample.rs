// core/src/downsample.rs
//
// Largest-Triangle-Three-Buckets, adapted to pick one sample for both force
// channels at once: the triangle area is computed per channel and summed, so
// a peak on either leg can win its bucket. Output is for rendering only.
use crate::models::Sample;

/// Fewer than 3 output points cannot keep both endpoints plus an interior
/// bucket; smaller thresholds are clamped here.
pub const MIN_THRESHOLD: usize = 3;

/// Reduce `samples` to at most `threshold` points while preserving the
/// largest visual features.
///
/// Identity when the input already fits (`len <= threshold`). Otherwise the
/// result has exactly `threshold` points and always starts and ends with the
/// original first/last samples. Deterministic: area ties keep the first
/// candidate encountered.
pub fn downsample(samples: &[Sample], threshold: usize) -> Vec<Sample> {
    let threshold = threshold.max(MIN_THRESHOLD);
    let n = samples.len();
    if n <= threshold {
        return samples.to_vec();
    }

    let bucket_size = (n - 2) as f64 / (threshold - 2) as f64;
    let mut sampled = Vec::with_capacity(threshold);
    sampled.push(samples[0]);
    let mut prev = samples[0];

    for i in 0..threshold - 2 {
        // Centroid of the *next* bucket acts as the anchor point. The
        // divisor is the nominal bucket width even when the bucket is cut
        // off at the end of the data; selection depends on this rounding,
        // so it must stay bit-for-bit stable.
        let avg_start = ((i + 1) as f64 * bucket_size).floor() as usize + 1;
        let avg_end = ((i + 2) as f64 * bucket_size).floor() as usize + 1;
        let avg_len = (avg_end - avg_start) as f64;

        let mut avg_time = 0.0;
        let mut avg_left = 0.0;
        let mut avg_right = 0.0;
        for s in &samples[avg_start..avg_end.min(n)] {
            avg_time += s.time;
            avg_left += s.left;
            avg_right += s.right;
        }
        avg_time /= avg_len;
        avg_left /= avg_len;
        avg_right /= avg_len;

        // Current bucket: pick the sample with the largest summed triangle
        // area against (previous pick, candidate, anchor).
        let range_start = (i as f64 * bucket_size).floor() as usize + 1;
        let range_end = (((i + 1) as f64 * bucket_size).floor() as usize + 1).min(n);

        let mut max_area = -1.0;
        let mut max_idx = range_start;

        for (j, s) in samples
            .iter()
            .enumerate()
            .take(range_end)
            .skip(range_start)
        {
            let area_left = ((prev.time - avg_time) * (s.left - prev.left)
                - (prev.time - s.time) * (avg_left - prev.left))
                .abs();
            let area_right = ((prev.time - avg_time) * (s.right - prev.right)
                - (prev.time - s.time) * (avg_right - prev.right))
                .abs();
            let area = area_left + area_right;

            if area > max_area {
                max_area = area;
                max_idx = j;
            }
        }

        prev = samples[max_idx];
        sampled.push(prev);
    }

    sampled.push(samples[n - 1]);
    sampled
}
