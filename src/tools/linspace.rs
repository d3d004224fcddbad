/// Evenly spaced values from start to end, both included
pub fn linspace(start: f64, end: f64, count: usize) -> impl Iterator<Item = f64> {
    let step = if count > 1 {
        (end - start) / (count - 1) as f64
    } else {
        0.0
    };

    (0..count).map(move |i| start + step * i as f64)
}
