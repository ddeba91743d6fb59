//! 宏工具函数

use proc_macro2::Span;
use syn::{Error, Expr, Ident, Lit, Result};

/// 驼峰名称转蛇形名称
pub fn to_snake_case(name: &str) -> String {
    let mut snake = String::with_capacity(name.len() + 4);
    for (i, ch) in name.chars().enumerate() {
        if ch.is_uppercase() {
            if i > 0 {
                snake.push('_');
            }
            snake.extend(ch.to_lowercase());
        } else {
            snake.push(ch);
        }
    }
    snake
}

/// 生成 ctor 登记函数名
pub fn registration_fn_ident(struct_name: &Ident) -> Ident {
    Ident::new(
        &format!(
            "__register_service_registration_{}",
            to_snake_case(&struct_name.to_string())
        ),
        Span::call_site(),
    )
}

/// 取出字符串字面量的值
pub fn lit_str_value(expr: &Expr) -> Result<String> {
    match expr {
        Expr::Lit(expr_lit) => match &expr_lit.lit {
            Lit::Str(lit_str) => Ok(lit_str.value()),
            other => Err(Error::new_spanned(other, "期望字符串字面量")),
        },
        other => Err(Error::new_spanned(other, "期望字符串字面量")),
    }
}
