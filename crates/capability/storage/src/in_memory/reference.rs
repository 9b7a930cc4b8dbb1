//! 地域参照内存存储实现
//!
//! 仅用于本地演示和测试。
//!
//! 功能：
//! - 内置演示用区域/区数据（两个区域、四个区）
//! - 区域/区列表查询

use crate::error::StorageError;
use crate::traits::ReferenceStore;
use domain::{District, Region};
use std::sync::RwLock;

/// 地域参照内存存储
pub struct InMemoryReferenceStore {
    regions: RwLock<Vec<Region>>,
    districts: RwLock<Vec<District>>,
}

impl InMemoryReferenceStore {
    /// 构造空存储。
    pub fn new(regions: Vec<Region>, districts: Vec<District>) -> Self {
        Self {
            regions: RwLock::new(regions),
            districts: RwLock::new(districts),
        }
    }

    /// 内置演示数据
    ///
    /// 创建包含两个区域、四个区的存储。
    pub fn with_demo_data() -> Self {
        let regions = vec![
            Region {
                region_id: "region-1".to_string(),
                name: "Accra East Region".to_string(),
            },
            Region {
                region_id: "region-2".to_string(),
                name: "Ashanti East Region".to_string(),
            },
        ];
        let districts = vec![
            District {
                district_id: "district-1".to_string(),
                region_id: "region-1".to_string(),
                name: "Makola".to_string(),
            },
            District {
                district_id: "district-2".to_string(),
                region_id: "region-1".to_string(),
                name: "Roman Ridge".to_string(),
            },
            District {
                district_id: "district-3".to_string(),
                region_id: "region-2".to_string(),
                name: "Kwabre".to_string(),
            },
            District {
                district_id: "district-4".to_string(),
                region_id: "region-2".to_string(),
                name: "Manhyia".to_string(),
            },
        ];
        Self::new(regions, districts)
    }
}

#[async_trait::async_trait]
impl ReferenceStore for InMemoryReferenceStore {
    /// 列出所有区域
    async fn list_regions(&self) -> Result<Vec<Region>, StorageError> {
        Ok(self
            .regions
            .read()
            .map(|list| list.clone())
            .unwrap_or_default())
    }

    /// 列出所有区
    async fn list_districts(&self) -> Result<Vec<District>, StorageError> {
        Ok(self
            .districts
            .read()
            .map(|list| list.clone())
            .unwrap_or_default())
    }
}
