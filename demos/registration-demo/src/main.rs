//! # 服务注册发现演示
//!
//! 演示如何用 `#[service_registration]` 声明注册类型，并在启动时一次性完成服务注册

use anyhow::Context;
use clap::Parser;
use di_abstractions::{
    registered_modules, DbServiceRegistration, IdentityServicesRegistration,
    RepositoriesRegistration, ServiceCollection, ServiceCollectionExt, ServicesRegistration,
    ServicesRegistrationWithConfig,
};
use di_impl::{ServiceCollectionImpl, ServiceRegistrar};
use infrastructure_common::{BoxError, Configuration};
use registration_macros::service_registration;
use serde::Deserialize;
use serde_json::json;
use tracing::info;
use tracing_subscriber::EnvFilter;

/// 命令行参数
#[derive(Parser, Debug)]
#[command(name = "registration-demo")]
#[command(about = "Lorn ADSP 服务注册发现演示")]
struct Args {
    /// JSON 配置文件路径，缺省时使用内置配置
    #[arg(short, long)]
    config: Option<String>,

    /// 不向注册方法传递配置
    #[arg(long)]
    no_config: bool,

    /// 日志级别
    #[arg(long, default_value = "info")]
    log_level: String,
}

/// 数据库连接选项
#[derive(Debug, Clone, Deserialize)]
struct DatabaseOptions {
    connection_string: String,
    #[serde(default = "default_pool_size")]
    pool_size: u32,
}

fn default_pool_size() -> u32 {
    8
}

impl Default for DatabaseOptions {
    fn default() -> Self {
        Self {
            connection_string: "sqlite::memory:".to_string(),
            pool_size: default_pool_size(),
        }
    }
}

/// 身份认证选项
#[derive(Debug, Clone)]
struct IdentityOptions {
    issuer: String,
}

/// 投放接口选项
#[derive(Debug, Clone)]
struct ApiOptions {
    base_path: String,
}

#[derive(Debug, Default)]
struct AdServingService;

#[derive(Debug, Default)]
struct CampaignRepository;

#[derive(Default)]
#[service_registration(database, module = "storage")]
struct DatabaseRegistration;

impl DbServiceRegistration for DatabaseRegistration {
    fn add_services(
        &self,
        services: &mut dyn ServiceCollection,
        configuration: Option<&Configuration>,
    ) -> Result<(), BoxError> {
        // 没有配置时使用内存数据库
        let options: DatabaseOptions = match configuration.and_then(|c| c.section("database")) {
            Some(section) => section.bind()?,
            None => DatabaseOptions::default(),
        };
        info!("数据库连接池大小: {}", options.pool_size);
        services.add_singleton(options);
        Ok(())
    }
}

#[derive(Default)]
#[service_registration(identity)]
struct IdentityRegistration;

impl IdentityServicesRegistration for IdentityRegistration {
    fn add_services(
        &self,
        services: &mut dyn ServiceCollection,
        configuration: Option<&Configuration>,
    ) -> Result<(), BoxError> {
        let issuer = configuration
            .and_then(|c| c.get("identity.issuer"))
            .and_then(|v| v.as_str())
            .unwrap_or("lorn-adsp")
            .to_string();
        services.add_singleton(IdentityOptions { issuer });
        Ok(())
    }
}

#[derive(Default)]
#[service_registration(with_config, services, repositories, module = "ad_serving")]
struct AdServingRegistration;

impl ServicesRegistrationWithConfig for AdServingRegistration {
    fn add_services(
        &self,
        services: &mut dyn ServiceCollection,
        configuration: Option<&Configuration>,
    ) -> Result<(), BoxError> {
        let base_path = match configuration {
            Some(configuration) if configuration.contains_key("api:base_path") => {
                configuration.get_required("api:base_path")?
            }
            _ => "/api".to_string(),
        };
        services.add_singleton(ApiOptions { base_path });
        Ok(())
    }
}

impl ServicesRegistration for AdServingRegistration {
    fn add_services(&self, services: &mut dyn ServiceCollection) -> Result<(), BoxError> {
        services.add_transient(AdServingService::default);
        Ok(())
    }
}

impl RepositoriesRegistration for AdServingRegistration {
    fn add_services(&self, services: &mut dyn ServiceCollection) -> Result<(), BoxError> {
        services.add_scoped(CampaignRepository::default);
        Ok(())
    }
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    // 初始化日志，RUST_LOG 优先
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&args.log_level)),
        )
        .init();

    info!("启动服务注册发现演示");

    let configuration = load_configuration(&args)?;
    let modules = registered_modules();
    for module in &modules {
        info!("已登记模块 {}: {} 个注册类型", module.name(), module.len());
    }

    let mut services = ServiceCollectionImpl::new();
    let mut registrar = ServiceRegistrar::new();
    // 失败已由注册器记录日志，这里只向上返回
    let report = registrar.discover_and_register(&modules, &mut services, configuration.as_ref())?;

    info!("发现运行 {} 完成", report.run_id);
    for record in &report.invocations {
        info!("  [{}] {} ({})", record.capability, record.type_name, record.module);
    }

    for descriptor in services.descriptors() {
        info!(
            "服务 {} -> {}",
            descriptor.service_type.short_name(),
            descriptor.lifetime
        );
    }

    if let Ok(database) = services.resolve::<DatabaseOptions>() {
        info!("数据库连接串: {}", database.connection_string);
    }
    let identity = services.resolve::<IdentityOptions>()?;
    let api = services.resolve::<ApiOptions>()?;
    info!("身份签发方: {}, 接口前缀: {}", identity.issuer, api.base_path);

    Ok(())
}

/// 读取配置文件或使用内置配置
fn load_configuration(args: &Args) -> anyhow::Result<Option<Configuration>> {
    if args.no_config {
        info!("不传递配置");
        return Ok(None);
    }

    let configuration = match &args.config {
        Some(path) => {
            let content = std::fs::read_to_string(path)
                .with_context(|| format!("读取配置文件失败: {path}"))?;
            let root: serde_json::Value = serde_json::from_str(&content)
                .with_context(|| format!("解析配置文件失败: {path}"))?;
            Configuration::new(root)
        }
        None => Configuration::new(json!({
            "database": { "connection_string": "postgres://localhost/adsp" },
            "identity": { "issuer": "lorn-adsp" },
            "api": { "base_path": "/api/v1" }
        })),
    };

    Ok(Some(configuration))
}
