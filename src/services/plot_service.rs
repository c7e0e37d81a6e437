//! 绘图数据整形：把体重记录变成前端可直接绘制的序列

use crate::models::{cat::Cat, weight::PlotData, weight::WeightRecord};

/// 构造某只猫的体重曲线数据
/// 记录必须已按日期升序排列；没有记录时返回空序列而不是错误
pub fn build_plot_data(cat: &Cat, records: &[WeightRecord]) -> PlotData {
    PlotData {
        cat_id: cat.id,
        name: cat.name.clone(),
        dates: records
            .iter()
            .map(|r| r.date.format("%Y-%m-%d").to_string())
            .collect(),
        weights: records.iter().map(|r| r.cat_weight).collect(),
        target_weight: cat.target_weight,
    }
}
