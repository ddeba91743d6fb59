//! 服务发现与注册引擎
//!
//! 把所有模块的候选类型展开成一个序列，按固定优先级逐类别筛选并调用注册方法。
//! 任何一次调用失败都会中止整个运行，没有部分成功。

use crate::invoker::{invoke, invoke_with_config};
use di_abstractions::{CandidateType, CapabilityKind, RegistrationModule, ServiceCollection};
use infrastructure_common::{Configuration, RegistrationError, RegistrationResult};
use tracing::{debug, error, info, info_span};
use uuid::Uuid;

/// 发现运行状态
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DiscoveryState {
    /// 尚未开始
    #[default]
    NotStarted,
    /// 正在展开模块中的类型
    Scanning,
    /// 正在处理某个能力类别
    Registering(CapabilityKind),
    /// 运行成功完成
    Complete,
    /// 运行失败，需要修正输入后重新运行
    Failed,
}

/// 一次注册方法调用记录
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvocationRecord {
    /// 能力类别
    pub capability: CapabilityKind,
    /// 候选类型名称
    pub type_name: String,
    /// 所属模块
    pub module: String,
}

/// 发现运行报告
#[derive(Debug, Clone)]
pub struct DiscoveryReport {
    /// 运行标识
    pub run_id: Uuid,
    /// 扫描的模块数量
    pub modules_scanned: usize,
    /// 扫描的候选类型数量（不去重）
    pub types_scanned: usize,
    /// 按调用顺序记录的注册调用
    pub invocations: Vec<InvocationRecord>,
}

impl DiscoveryReport {
    fn new(run_id: Uuid) -> Self {
        Self {
            run_id,
            modules_scanned: 0,
            types_scanned: 0,
            invocations: Vec::new(),
        }
    }

    /// 注册调用总次数
    pub fn invocation_count(&self) -> usize {
        self.invocations.len()
    }

    /// 指定类别的调用次数
    pub fn count_for(&self, capability: CapabilityKind) -> usize {
        self.invocations
            .iter()
            .filter(|record| record.capability == capability)
            .count()
    }
}

/// 服务注册器
///
/// 每次调用 [`ServiceRegistrar::discover_and_register`] 都是一次独立的运行，
/// 无论上次结果如何，新的运行都从 `Scanning` 重新开始。
#[derive(Debug, Default)]
pub struct ServiceRegistrar {
    state: DiscoveryState,
}

impl ServiceRegistrar {
    /// 创建新的注册器
    pub fn new() -> Self {
        Self::default()
    }

    /// 最近一次运行的状态
    pub fn state(&self) -> DiscoveryState {
        self.state
    }

    /// 发现所有模块中的注册类型并依次调用
    pub fn discover_and_register(
        &mut self,
        modules: &[RegistrationModule],
        services: &mut dyn ServiceCollection,
        configuration: Option<&Configuration>,
    ) -> RegistrationResult<DiscoveryReport> {
        let run_id = Uuid::new_v4();
        let span = info_span!("service_discovery", %run_id);
        let _guard = span.enter();

        self.state = DiscoveryState::Scanning;
        let types: Vec<(&RegistrationModule, &CandidateType)> = modules
            .iter()
            .flat_map(|module| module.types().iter().map(move |candidate| (module, candidate)))
            .collect();

        let mut report = DiscoveryReport::new(run_id);
        report.modules_scanned = modules.len();
        report.types_scanned = types.len();
        info!(
            "开始服务发现: {} 个模块, {} 个候选类型",
            report.modules_scanned, report.types_scanned
        );

        match self.register_all(&types, services, configuration, &mut report) {
            Ok(()) => {
                self.state = DiscoveryState::Complete;
                info!("服务发现完成, 共调用 {} 次注册方法", report.invocation_count());
                Ok(report)
            }
            Err(e) => {
                error!("服务发现失败 ({:?}): {}", self.state, e);
                self.state = DiscoveryState::Failed;
                Err(RegistrationError::discovery_failed(e))
            }
        }
    }

    fn register_all(
        &mut self,
        types: &[(&RegistrationModule, &CandidateType)],
        services: &mut dyn ServiceCollection,
        configuration: Option<&Configuration>,
        report: &mut DiscoveryReport,
    ) -> RegistrationResult<()> {
        for capability in CapabilityKind::PRIORITY_ORDER {
            self.state = DiscoveryState::Registering(capability);

            let matching = types
                .iter()
                .filter(|(_, candidate)| candidate.implements(capability));

            for (module, candidate) in matching {
                let method_name = capability.method_name();
                if capability.requires_configuration() {
                    invoke_with_config(candidate, capability, services, configuration, method_name)?;
                } else {
                    invoke(candidate, capability, services, method_name)?;
                }

                report.invocations.push(InvocationRecord {
                    capability,
                    type_name: candidate.type_name().to_string(),
                    module: module.name().to_string(),
                });
            }

            debug!(
                "类别 {} 处理完成: {} 次调用",
                capability.as_str(),
                report.count_for(capability)
            );
        }

        Ok(())
    }
}

/// 使用一次性注册器执行发现
pub fn discover_and_register(
    modules: &[RegistrationModule],
    services: &mut dyn ServiceCollection,
    configuration: Option<&Configuration>,
) -> RegistrationResult<DiscoveryReport> {
    ServiceRegistrar::new().discover_and_register(modules, services, configuration)
}
