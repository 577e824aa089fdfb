use std::ops::Range;

/// Smallest and largest element, None for an empty iterator.
pub fn min_and_max<'a, I, T>(mut s: I) -> Option<(T, T)>
where
    I: Iterator<Item = &'a T>,
    T: 'a + std::cmp::PartialOrd + Clone,
{
    let (mut min, mut max) = match s.next() {
        Some(v) => (v, v),
        None => return None,
    };
    for es in s {
        if es > max {
            max = es
        } else if es < min {
            min = es
        }
    }
    Some((min.clone(), max.clone()))
}

/// X range covering all the fixed ticks and every point,
/// padded by 5% of the span (at least 1) on each side.
pub fn x_range(ticks: &[i64], xs: &[i64]) -> Range<i64> {
    let (xmin, xmax) = min_and_max(ticks.iter().chain(xs.iter())).unwrap_or((0, 1));
    let pad = ((xmax - xmin) / 20).max(1);
    (xmin - pad)..(xmax + pad)
}

/// Y range from zero to 10% above the largest finite value,
/// 0..1 when there is nothing positive to show.
pub fn y_range(ys: &[f64]) -> Range<f64> {
    let finite: Vec<f64> = ys.iter().filter(|y| y.is_finite()).copied().collect();
    match min_and_max(finite.iter()) {
        Some((_, ymax)) if ymax > 0. => 0.0..(ymax * 1.1),
        _ => 0.0..1.0,
    }
}

/// Ops per second get large, keep the y labels short.
pub fn format_ops(v: f64) -> String {
    let a = v.abs();
    if a >= 1e9 {
        format!("{:.1}G", v / 1e9)
    } else if a >= 1e6 {
        format!("{:.1}M", v / 1e6)
    } else if a >= 1e3 {
        format!("{:.1}k", v / 1e3)
    } else {
        format!("{:.0}", v)
    }
}
