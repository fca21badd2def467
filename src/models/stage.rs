use std::fmt;

/// 流程阶段，按依赖顺序排列
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Stage {
    /// 导入文档
    Ingest,
    /// 调用 LLM 分析
    Analyze,
    /// 人工编辑
    Refine,
    /// 导出文稿
    Publish,
}

impl Stage {
    pub const ALL: [Stage; 4] = [Stage::Ingest, Stage::Analyze, Stage::Refine, Stage::Publish];

    /// 获取阶段名称
    pub fn name(self) -> &'static str {
        match self {
            Stage::Ingest => "Ingest",
            Stage::Analyze => "Analyze",
            Stage::Refine => "Refine",
            Stage::Publish => "Publish",
        }
    }

    /// 获取步骤编号（从1开始）
    pub fn step(self) -> usize {
        self as usize + 1
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}
