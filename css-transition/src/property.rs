//! # Property 模块
//!
//! 样式属性分类：区分 transform 子属性与普通 CSS 属性。
//!
//! | 键 | transform 函数 | 单位 |
//! |----|----------------|------|
//! | `translate` / `translate3d` / `x` / `y` / `z` / `perspective` | 同名（`x` -> `translateX` 等） | `px` |
//! | `rotate*` / `skew*` | 同名 | `deg` |
//! | `matrix*` / `scale*` | 同名 | 无 |

use crate::value::{DEG, PX};

/// transform 过渡使用的属性名
pub const TRANSFORM_PROPERTY: &str = "transform";

/// 可识别的 transform 键及其对应的 CSS 函数名
const TRANSFORM_FUNCTIONS: &[(&str, &str)] = &[
    ("matrix", "matrix"),
    ("matrix3d", "matrix3d"),
    ("perspective", "perspective"),
    ("rotate", "rotate"),
    ("rotateX", "rotateX"),
    ("rotateY", "rotateY"),
    ("rotateZ", "rotateZ"),
    ("rotate3d", "rotate3d"),
    ("scale", "scale"),
    ("scaleX", "scaleX"),
    ("scaleY", "scaleY"),
    ("scaleZ", "scaleZ"),
    ("scale3d", "scale3d"),
    ("skew", "skew"),
    ("skewX", "skewX"),
    ("skewY", "skewY"),
    ("translate3d", "translate3d"),
    ("translate", "translate"),
    ("x", "translateX"),
    ("y", "translateY"),
    ("z", "translateZ"),
];

/// 查找 transform 函数名
///
/// 返回 `None` 表示该键是普通 CSS 属性。
pub fn transform_function(key: &str) -> Option<&'static str> {
    TRANSFORM_FUNCTIONS
        .iter()
        .find(|(name, _)| *name == key)
        .map(|(_, function)| *function)
}

/// transform 函数参数的单位
///
/// 按函数名前缀判断：`translate*` / `perspective*` 为 `px`，`skew*` / `rotate*` 为 `deg`，
/// 其余（matrix、scale 系列）不补单位。
pub fn transform_unit(function: &str) -> Option<&'static str> {
    if function.starts_with("translate") || function.starts_with("perspective") {
        Some(PX)
    } else if function.starts_with("skew") || function.starts_with("rotate") {
        Some(DEG)
    } else {
        None
    }
}

/// 驼峰命名转连字符命名
///
/// 每个大写字母前插入 `-`，开头的 `ms` 前也插入 `-`（`msTransform` -> `-ms-transform`）。
pub fn css_case(key: &str) -> String {
    let mut out = String::with_capacity(key.len() + 4);
    if key.starts_with("ms") {
        out.push('-');
    }
    for c in key.chars() {
        if c.is_ascii_uppercase() {
            out.push('-');
        }
        out.push(c);
    }
    out.to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transform_function_aliases() {
        assert_eq!(transform_function("x"), Some("translateX"));
        assert_eq!(transform_function("y"), Some("translateY"));
        assert_eq!(transform_function("z"), Some("translateZ"));
        assert_eq!(transform_function("rotate3d"), Some("rotate3d"));
        assert_eq!(transform_function("opacity"), None);
        // 未在表中的函数名按普通属性处理
        assert_eq!(transform_function("translateX"), None);
        assert_eq!(transform_function("transform"), None);
    }

    #[test]
    fn test_transform_unit() {
        assert_eq!(transform_unit("translateX"), Some("px"));
        assert_eq!(transform_unit("translate3d"), Some("px"));
        assert_eq!(transform_unit("perspective"), Some("px"));
        assert_eq!(transform_unit("rotate"), Some("deg"));
        assert_eq!(transform_unit("rotate3d"), Some("deg"));
        assert_eq!(transform_unit("skewY"), Some("deg"));
        assert_eq!(transform_unit("matrix3d"), None);
        assert_eq!(transform_unit("scaleX"), None);
    }

    #[test]
    fn test_every_transform_has_a_function() {
        for (key, function) in TRANSFORM_FUNCTIONS {
            assert_eq!(transform_function(key), Some(*function));
        }
    }

    #[test]
    fn test_css_case() {
        assert_eq!(css_case("opacity"), "opacity");
        assert_eq!(css_case("backgroundColor"), "background-color");
        assert_eq!(css_case("borderTopLeftRadius"), "border-top-left-radius");
        assert_eq!(css_case("msTransform"), "-ms-transform");
        assert_eq!(css_case("WebkitTransform"), "-webkit-transform");
        assert_eq!(css_case("--customProp"), "--custom-prop");
    }
}
