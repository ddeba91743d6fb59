//! 注册模块
//!
//! 一组具名的候选类型，相当于一个被扫描的程序模块

use crate::candidate::{CandidateType, RegistrationType};

/// 注册模块
#[derive(Debug, Clone)]
pub struct RegistrationModule {
    name: String,
    types: Vec<CandidateType>,
}

impl RegistrationModule {
    /// 创建空模块
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            types: Vec::new(),
        }
    }

    /// 添加候选类型
    pub fn with_type(mut self, candidate: impl Into<CandidateType>) -> Self {
        self.push(candidate);
        self
    }

    /// 添加注册类型
    pub fn with<T: RegistrationType>(self) -> Self {
        self.with_type(T::candidate_type())
    }

    /// 追加候选类型
    pub fn push(&mut self, candidate: impl Into<CandidateType>) {
        self.types.push(candidate.into());
    }

    /// 模块名称
    pub fn name(&self) -> &str {
        &self.name
    }

    /// 模块中定义的候选类型
    pub fn types(&self) -> &[CandidateType] {
        &self.types
    }

    /// 候选类型数量
    pub fn len(&self) -> usize {
        self.types.len()
    }

    /// 是否没有候选类型
    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }
}
