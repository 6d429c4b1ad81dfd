use std::fmt;

use anyhow::{anyhow, Context, Result};

// "-s 10" 形式のオプションの値を取得
pub fn next_value<T>(it: &mut std::slice::Iter<'_, String>, opt: &str) -> Result<T>
where
    T: std::str::FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    let n = it.next().ok_or_else(|| anyhow!("{}: value missing", opt))?;
    n.parse().with_context(|| format!("{}: '{}'", opt, n))
}

pub fn unixtime_now() -> f64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_millis() as f64 / 1000.0)
        .unwrap_or(0.0)
}

pub fn vec_to_string<T: fmt::Display>(v: &[T]) -> String {
    let vs: Vec<String> = v.iter().map(|x| format!("{}", x)).collect();
    "[".to_string() + &vs.join(", ") + "]"
}

#[test]
fn test_next_value() {
    let args: Vec<String> = vec!["12".into(), "x".into()];
    let mut it = args.iter();
    let n: u64 = next_value(&mut it, "-s").unwrap();
    assert_eq!(n, 12);
    assert!(next_value::<u64>(&mut it, "-s").is_err());
    assert!(next_value::<u64>(&mut it, "-s").is_err());
    assert_eq!(vec_to_string(&[1, 2]), "[1, 2]");
}
