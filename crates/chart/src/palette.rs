use finboard_core::chart::port::ColorPicker;
use rand::Rng;
use std::sync::atomic::{AtomicUsize, Ordering};

/// # Summary
/// 随机颜色分配器，每次返回一个 `#RRGGBB` 颜色。
#[derive(Debug, Default, Clone, Copy)]
pub struct RandomPalette;

impl ColorPicker for RandomPalette {
    fn next_color(&self) -> String {
        let mut rng = rand::rng();
        let rgb: u32 = rng.random_range(0..=0x00FF_FFFF);
        format!("#{:06X}", rgb)
    }
}

/// # Summary
/// 按固定顺序循环返回颜色，测试中用于获得确定的配色。
///
/// # Invariants
/// - 颜色列表为空时返回黑色 `#000000`。
#[derive(Debug, Default)]
pub struct FixedPalette {
    colors: Vec<String>,
    cursor: AtomicUsize,
}

impl FixedPalette {
    pub fn new<I, S>(colors: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            colors: colors.into_iter().map(Into::into).collect(),
            cursor: AtomicUsize::new(0),
        }
    }
}

impl ColorPicker for FixedPalette {
    fn next_color(&self) -> String {
        if self.colors.is_empty() {
            return "#000000".to_string();
        }
        let index = self.cursor.fetch_add(1, Ordering::Relaxed) % self.colors.len();
        self.colors
            .get(index)
            .cloned()
            .unwrap_or_else(|| "#000000".to_string())
    }
}

/// 判断是否为 `#RRGGBB` 形式的颜色。
pub fn is_valid_color(color: &str) -> bool {
    color
        .strip_prefix('#')
        .is_some_and(|hex| hex.len() == 6 && hex.chars().all(|c| c.is_ascii_hexdigit()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_random_palette_yields_hex_colors() {
        let palette = RandomPalette;
        for _ in 0..100 {
            let color = palette.next_color();
            assert!(is_valid_color(&color), "bad color {color}");
        }
    }

    #[test]
    fn test_fixed_palette_cycles() {
        let palette = FixedPalette::new(["#111111", "#222222"]);
        assert_eq!(palette.next_color(), "#111111");
        assert_eq!(palette.next_color(), "#222222");
        assert_eq!(palette.next_color(), "#111111");
        assert_eq!(FixedPalette::default().next_color(), "#000000");
    }

    #[test]
    fn test_is_valid_color() {
        assert!(is_valid_color("#A1b2C3"));
        assert!(!is_valid_color("A1B2C3"));
        assert!(!is_valid_color("#12345"));
        assert!(!is_valid_color("#GGGGGG"));
    }
}
