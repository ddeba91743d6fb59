//! 配置相关的基础类型定义
//!
//! 发现机制只透传配置，不做加载和校验；这里的类型供注册代码读取配置使用。

use crate::errors::{ConfigError, ConfigResult};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::HashMap;

/// 配置节
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConfigSection {
    /// 配置数据
    pub data: HashMap<String, Value>,
}

impl ConfigSection {
    /// 创建新的配置节
    pub fn new() -> Self {
        Self {
            data: HashMap::new(),
        }
    }

    /// 插入配置项
    pub fn insert(&mut self, key: impl Into<String>, value: Value) {
        self.data.insert(key.into(), value);
    }

    /// 获取配置项
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.data.get(key)
    }

    /// 绑定到具体类型
    pub fn bind<T>(&self) -> ConfigResult<T>
    where
        T: DeserializeOwned,
    {
        let value = Value::Object(
            self.data
                .iter()
                .map(|(k, v)| (k.clone(), v.clone()))
                .collect(),
        );

        serde_json::from_value(value).map_err(|e| ConfigError::SerializationError { source: e })
    }
}

impl Default for ConfigSection {
    fn default() -> Self {
        Self::new()
    }
}

/// 应用配置
///
/// 宿主加载好的只读配置树。键路径支持 `.` 和 `:` 两种分隔符，
/// 例如 `database.connection_string` 或 `Database:ConnectionString`。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Configuration {
    root: Value,
}

impl Configuration {
    /// 从配置树创建
    pub fn new(root: Value) -> Self {
        Self { root }
    }

    /// 空配置
    pub fn empty() -> Self {
        Self::new(Value::Object(Map::new()))
    }

    /// 配置树根节点
    pub fn root(&self) -> &Value {
        &self.root
    }

    /// 按路径获取配置值
    pub fn get(&self, path: &str) -> Option<&Value> {
        path.split(['.', ':'])
            .filter(|segment| !segment.is_empty())
            .try_fold(&self.root, |node, segment| node.get(segment))
    }

    /// 检查配置路径是否存在
    pub fn contains_key(&self, path: &str) -> bool {
        self.get(path).is_some()
    }

    /// 按路径获取并转换配置值，路径不存在时报错
    pub fn get_required<T>(&self, path: &str) -> ConfigResult<T>
    where
        T: DeserializeOwned,
    {
        let value = self.get(path).ok_or_else(|| ConfigError::KeyNotFound {
            key: path.to_string(),
        })?;

        serde_json::from_value(value.clone()).map_err(|e| ConfigError::TypeConversionError {
            message: format!("{path}: {e}"),
        })
    }

    /// 获取配置节
    pub fn section(&self, name: &str) -> Option<ConfigSection> {
        match self.get(name)? {
            Value::Object(map) => Some(ConfigSection {
                data: map.iter().map(|(k, v)| (k.clone(), v.clone())).collect(),
            }),
            _ => None,
        }
    }

    /// 将整个配置树绑定到具体类型
    pub fn bind<T>(&self) -> ConfigResult<T>
    where
        T: DeserializeOwned,
    {
        serde_json::from_value(self.root.clone())
            .map_err(|e| ConfigError::SerializationError { source: e })
    }
}

impl Default for Configuration {
    fn default() -> Self {
        Self::empty()
    }
}

impl From<Value> for Configuration {
    fn from(root: Value) -> Self {
        Self::new(root)
    }
}

impl From<ConfigSection> for Configuration {
    fn from(section: ConfigSection) -> Self {
        Self::new(Value::Object(section.data.into_iter().collect()))
    }
}
