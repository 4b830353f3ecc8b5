// ==========================================
// 产品导入 - 产品导入器实现
// ==========================================
// 职责: 整合导入流程，从文本/文件到仓储
// 流程: 解析 → 校验 → 转换并复核 SKU → 新建/覆盖统计 → 落库 → 记录批次
// 约束: 批次存在任何错误时整批不落库（批次信息仍记录）
// ==========================================

use crate::config::ImportConfig;
use crate::domain::import::{ImportBatch, ImportOutcome, ImportValidationResult};
use crate::domain::product::{Product, RawProductRecord};
use crate::importer::error::{ImportError, ImportResult};
use crate::importer::file_parser::{ParsedPayload, UniversalFileParser};
use crate::importer::import_validator::ImportValidator;
use crate::importer::json_parser::parse_json_products;
use crate::importer::product_importer_trait::{FileParser, ProductImporter};
use crate::importer::record_builder::RecordBuilder;
use crate::repository::ProductRepository;
use chrono::{DateTime, Utc};
use futures::future::join_all;
use std::collections::HashSet;
use std::path::Path;
use std::time::Instant;
use tracing::{debug, error, info, instrument, warn};
use uuid::Uuid;

// ==========================================
// ProductImporterImpl - 产品导入器实现
// ==========================================
pub struct ProductImporterImpl<R>
where
    R: ProductRepository,
{
    // 数据访问层
    repo: R,

    // 导入配置
    config: ImportConfig,

    // 导入组件
    file_parser: Box<dyn FileParser>,
    record_builder: RecordBuilder,
    validator: ImportValidator,
}

impl<R> ProductImporterImpl<R>
where
    R: ProductRepository,
{
    /// 创建导入器（组件按配置构建）
    pub fn new(repo: R, config: ImportConfig) -> Self {
        let record_builder = RecordBuilder::with_default_unit(config.default_unit.clone());
        let validator = ImportValidator::from_config(&config);
        let file_parser = Box::new(UniversalFileParser::new(record_builder.clone()));

        Self {
            repo,
            config,
            file_parser,
            record_builder,
            validator,
        }
    }

    /// 替换文件解析器
    pub fn with_file_parser(mut self, file_parser: Box<dyn FileParser>) -> Self {
        self.file_parser = file_parser;
        self
    }

    pub fn repository(&self) -> &R {
        &self.repo
    }

    pub fn config(&self) -> &ImportConfig {
        &self.config
    }

    /// 仅校验，不落库
    pub fn validate_payload(&self, payload: &ParsedPayload) -> ImportValidationResult {
        payload.validate(&self.validator)
    }

    /// 导入已解析载荷
    #[instrument(skip(self, payload), fields(batch_id = tracing::field::Empty))]
    pub async fn import_payload(
        &self,
        payload: ParsedPayload,
        source_name: Option<String>,
    ) -> ImportResult<ImportOutcome> {
        let start_time = Instant::now();
        let batch_id = Uuid::new_v4().to_string();
        tracing::Span::current().record("batch_id", batch_id.as_str());

        let total_rows = payload.len();
        info!(
            batch_id = %batch_id,
            source = source_name.as_deref().unwrap_or("unknown"),
            total_rows,
            "开始导入产品数据"
        );

        // === 步骤 1: 批次校验 ===
        debug!("步骤 1: 批次校验");
        let mut validation = payload.validate(&self.validator);

        // === 步骤 2: 转换为 RawProductRecord 并复核 SKU ===
        // JSON 取值在转换时会被 TRIM，校验时不同的 SKU 可能在此合并
        let records = if validation.is_valid {
            debug!("步骤 2: 转换记录并复核 SKU");
            let records = payload.into_raw_records(&self.record_builder);
            let collisions = self.validator.find_duplicate_skus(&records);
            if !collisions.is_empty() {
                warn!(count = collisions.len(), "转换后 SKU 冲突");
                let mut errors = validation.errors;
                errors.extend(collisions);
                validation = ImportValidationResult::from_issues(errors, validation.warnings);
            }
            records
        } else {
            Vec::new()
        };

        let blocked = validation.blocked_rows().len();
        info!(
            errors = validation.errors.len(),
            warnings = validation.warnings.len(),
            blocked,
            "批次校验完成"
        );

        let mut batch = ImportBatch {
            batch_id: batch_id.clone(),
            source_name,
            total_rows,
            created: 0,
            updated: 0,
            blocked,
            warning_count: validation.warnings.len(),
            committed: false,
            imported_at: Utc::now(),
            elapsed_ms: 0,
        };

        if !validation.is_valid {
            warn!(batch_id = %batch_id, blocked, "批次存在错误，跳过落库");
            batch.elapsed_ms = start_time.elapsed().as_millis() as u64;
            self.repo.insert_batch(batch.clone()).await?;
            return Ok(ImportOutcome { batch, validation });
        }

        // === 步骤 3: 转换为 Product ===
        debug!("步骤 3: 转换为 Product");
        let now = Utc::now();
        let products = records
            .into_iter()
            .map(|record| self.to_product(record, now))
            .collect::<ImportResult<Vec<_>>>()?;

        // === 步骤 4: 新建/覆盖统计 ===
        debug!("步骤 4: 新建/覆盖统计");
        let skus: Vec<String> = products.iter().map(|p| p.sku.clone()).collect();
        let mut known: HashSet<String> = self
            .repo
            .find_existing_skus(&skus)
            .await?
            .into_iter()
            .collect();
        for sku in skus {
            if known.insert(sku) {
                batch.created += 1;
            } else {
                batch.updated += 1;
            }
        }

        // === 步骤 5: 写入仓储 ===
        debug!("步骤 5: 写入仓储");
        let written = self.repo.upsert_products(products).await?;
        batch.committed = true;
        batch.elapsed_ms = start_time.elapsed().as_millis() as u64;

        // === 步骤 6: 记录批次 ===
        self.repo.insert_batch(batch.clone()).await?;

        info!(
            batch_id = %batch_id,
            written,
            created = batch.created,
            updated = batch.updated,
            elapsed_ms = batch.elapsed_ms,
            "产品数据导入完成"
        );

        Ok(ImportOutcome { batch, validation })
    }

    /// RawProductRecord → Product（仅用于已通过校验的记录）
    fn to_product(&self, record: RawProductRecord, now: DateTime<Utc>) -> ImportResult<Product> {
        let row = record.row_number;
        let sku = non_empty(record.sku).ok_or_else(|| {
            ImportError::InternalError(format!("第 {} 行缺少 sku（应已被校验拦截）", row))
        })?;
        let name = non_empty(record.name).ok_or_else(|| {
            ImportError::InternalError(format!("第 {} 行缺少 name（应已被校验拦截）", row))
        })?;

        Ok(Product {
            sku,
            name,
            description: non_empty(record.description),
            category: non_empty(record.category),
            barcode: non_empty(record.barcode),
            unit: non_empty(record.unit).unwrap_or_else(|| self.config.default_unit.clone()),
            is_active: record.is_active.unwrap_or(true),
            price: record.price.unwrap_or(0.0),
            cost: record.cost.unwrap_or(0.0),
            stock: record.stock.unwrap_or(0),
            min_stock: record.min_stock.unwrap_or(0),
            extra: record.extra,
            created_at: now,
            updated_at: now,
        })
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.and_then(|v| {
        let trimmed = v.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(trimmed.to_string())
        }
    })
}

#[async_trait::async_trait]
impl<R> ProductImporter for ProductImporterImpl<R>
where
    R: ProductRepository,
{
    async fn import_csv_text(
        &self,
        content: &str,
        source_name: Option<String>,
    ) -> ImportResult<ImportOutcome> {
        let records = self.record_builder.build(content);
        self.import_payload(ParsedPayload::Csv(records), source_name)
            .await
    }

    async fn import_json_text(
        &self,
        content: &str,
        source_name: Option<String>,
    ) -> ImportResult<ImportOutcome> {
        let objects = parse_json_products(content).map_err(|e| {
            error!(error = %e, "JSON 载荷解析失败");
            e
        })?;
        self.import_payload(ParsedPayload::Json(objects), source_name)
            .await
    }

    async fn import_file<P: AsRef<Path> + Send>(
        &self,
        file_path: P,
    ) -> ImportResult<ImportOutcome> {
        let path = file_path.as_ref();
        let payload = self.file_parser.parse_file(path).map_err(|e| {
            error!(file = %path.display(), error = %e, "文件解析失败");
            e
        })?;

        let file_name = path
            .file_name()
            .and_then(|n| n.to_str())
            .map(str::to_string);
        self.import_payload(payload, file_name).await
    }

    async fn batch_import<P: AsRef<Path> + Send + Sync>(
        &self,
        file_paths: Vec<P>,
    ) -> Vec<Result<ImportOutcome, String>> {
        info!(count = file_paths.len(), "开始批量导入文件");

        let import_tasks = file_paths.into_iter().map(|path| async move {
            let path_str = path.as_ref().display().to_string();
            match self.import_file(path).await {
                Ok(outcome) => {
                    info!(
                        file = %path_str,
                        committed = outcome.batch.committed,
                        "文件导入完成"
                    );
                    Ok(outcome)
                }
                Err(e) => {
                    error!(file = %path_str, error = %e, "文件导入失败");
                    Err(format!("文件 {} 导入失败: {}", path_str, e))
                }
            }
        });

        let results = join_all(import_tasks).await;

        info!(
            total = results.len(),
            success = results.iter().filter(|r| r.is_ok()).count(),
            failed = results.iter().filter(|r| r.is_err()).count(),
            "批量导入完成"
        );

        results
    }
}
