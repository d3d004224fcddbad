/// Replaces NaN cells with `fill_value` and returns the (min, max) of the cells
/// that were present, or None when every cell was missing
pub fn fill_missing(data: &mut [f64], fill_value: f64) -> Option<(f64, f64)> {
    let mut bounds: Option<(f64, f64)> = None;

    for v in data.iter_mut() {
        if v.is_nan() {
            *v = fill_value;
            continue;
        }

        bounds = match bounds {
            Some((min, max)) => Some((min.min(*v), max.max(*v))),
            None => Some((*v, *v)),
        };
    }

    bounds
}

#[cfg(test)]
mod tests {
    use super::fill_missing;

    #[test]
    fn test_fill_missing() {
        let mut cells = vec![301.5, f64::NAN, 299.0, 300.25];
        assert_eq!(fill_missing(&mut cells, -9999.0), Some((299.0, 301.5)));
        assert_eq!(cells[1], -9999.0);
    }

    #[test]
    fn test_all_missing() {
        let mut cells = vec![f64::NAN; 3];
        assert_eq!(fill_missing(&mut cells, 0.0), None);
        assert_eq!(cells, vec![0.0; 3]);
    }
}
