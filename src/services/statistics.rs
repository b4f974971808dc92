/// Ordinary least squares fit of a value series against array position.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RegressionFit {
    pub slope: f64,
    pub intercept: f64,
    pub r_squared: f64,
}

/// Linear regression for y-values using x = 0..n-1.
///
/// Degenerate series fall back to a flat fit: fewer than two points give
/// slope 0 with the single value (or 0) as intercept, and a constant series
/// reports R² = 0 rather than dividing by a zero total sum of squares.
pub fn linear_regression(values: &[f64]) -> RegressionFit {
    let n = values.len();
    if n == 0 {
        return RegressionFit {
            slope: 0.0,
            intercept: 0.0,
            r_squared: 0.0,
        };
    }
    if n == 1 {
        return RegressionFit {
            slope: 0.0,
            intercept: values[0],
            r_squared: 0.0,
        };
    }

    let n_f = n as f64;

    // Fold over enumerated points to get the regression sums.
    let (sum_x, sum_y, sum_xy, sum_x2) = values
        .iter()
        .enumerate()
        .fold((0.0, 0.0, 0.0, 0.0), |(sx, sy, sxy, sx2), (i, &y)| {
            let x = i as f64;
            (sx + x, sy + y, sxy + x * y, sx2 + x * x)
        });

    let mean_y = sum_y / n_f;
    let denom = n_f * sum_x2 - sum_x * sum_x;
    if denom == 0.0 {
        return RegressionFit {
            slope: 0.0,
            intercept: mean_y,
            r_squared: 0.0,
        };
    }

    let slope = (n_f * sum_xy - sum_x * sum_y) / denom;
    let intercept = (sum_y - slope * sum_x) / n_f;

    let (ss_res, ss_tot) = values
        .iter()
        .enumerate()
        .fold((0.0, 0.0), |(res, tot), (i, &y)| {
            let fitted = slope * i as f64 + intercept;
            (res + (y - fitted).powi(2), tot + (y - mean_y).powi(2))
        });

    let r_squared = if ss_tot == 0.0 {
        0.0
    } else {
        1.0 - ss_res / ss_tot
    };

    RegressionFit {
        slope,
        intercept,
        r_squared,
    }
}

/// Causal moving average: each output is the mean of the trailing window of
/// size `min(window, i + 1)`, so the series warms up from width 1 instead of
/// emitting gaps. Output length equals input length.
pub fn moving_average(values: &[f64], window: usize) -> Vec<f64> {
    let window = window.max(1);

    // Running sum; the value that falls out of the window is subtracted.
    values
        .iter()
        .enumerate()
        .scan(0.0_f64, move |sum, (i, &v)| {
            *sum += v;
            if i >= window {
                *sum -= values[i - window];
            }

            let width = window.min(i + 1) as f64;
            Some(*sum / width)
        })
        .collect()
}

/// Exponential smoothing seeded with the first raw value:
/// `s[0] = x[0]`, `s[i] = alpha * x[i] + (1 - alpha) * s[i-1]`.
pub fn exponential_smoothing(values: &[f64], alpha: f64) -> Vec<f64> {
    if values.is_empty() {
        return Vec::new();
    }

    values
        .iter()
        .enumerate()
        .scan(values[0], move |prev, (i, &v)| {
            let next = if i == 0 {
                v
            } else {
                alpha * v + (1.0 - alpha) * *prev
            };
            *prev = next;
            Some(next)
        })
        .collect()
}

/// Unbiased sample standard deviation (n - 1 divisor); 0 when n < 2.
pub fn sample_std_dev(values: &[f64]) -> f64 {
    let n = values.len();
    if n < 2 {
        return 0.0;
    }

    let mean = values.iter().sum::<f64>() / n as f64;
    let variance = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / (n as f64 - 1.0);
    variance.sqrt()
}
