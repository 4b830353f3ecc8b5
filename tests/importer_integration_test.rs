// ==========================================
// 产品导入器集成测试
// ==========================================
// 测试目标: 文件导入、批量导入、配置、模板回灌
// ==========================================


use product_import::domain::types::RowNumbering;
use product_import::importer::ImportError;
use product_import::{
    generate_template, logging, ImportConfig, ProductImporter, ProductRepository, TemplateFormat,
};
use test_helpers::{create_temp_file, create_test_importer, csv_with_rows, ProductRowBuilder};

#[tokio::test]
async fn test_import_csv_file() {
    logging::init_test();

    let content = csv_with_rows(&[
        ProductRowBuilder::new("P-001").build(),
        ProductRowBuilder::new("P-002").unit("").build(),
        ProductRowBuilder::new("P-003").price("12.5").cost("4").build(),
    ]);
    let file = create_temp_file(".csv", &content);

    let importer = create_test_importer(ImportConfig::default());
    let outcome = importer.import_file(file.path()).await.unwrap();

    assert!(outcome.validation.is_valid);
    assert!(outcome.batch.committed);
    assert_eq!(outcome.batch.total_rows, 3);
    assert_eq!(outcome.batch.created, 3);
    assert_eq!(outcome.batch.updated, 0);
    assert!(outcome
        .batch
        .source_name
        .as_deref()
        .is_some_and(|name| name.ends_with(".csv")));

    let products = importer.repository().list_products().await.unwrap();
    assert_eq!(products.len(), 3);
    assert_eq!(products[1].unit, "pieza");
    assert_eq!(products[2].price, 12.5);
}

#[tokio::test]
async fn test_import_csv_file_with_bom() {
    logging::init_test();

    let content = format!("\u{feff}{}", csv_with_rows(&[ProductRowBuilder::new("B-1").build()]));
    let file = create_temp_file(".csv", &content);

    let importer = create_test_importer(ImportConfig::default());
    let outcome = importer.import_file(file.path()).await.unwrap();

    // BOM 去除后 "SKU" 表头仍可识别
    assert!(outcome.validation.is_valid);
    assert!(importer.repository().get_product("B-1").await.unwrap().is_some());
}

#[tokio::test]
async fn test_import_json_file() {
    logging::init_test();

    let file = create_temp_file(
        ".json",
        r#"[
            {"sku": "J-1", "name": "Cable", "price": 3, "cost": 1, "isActive": false},
            {"sku": "J-2", "name": "Enchufe", "price": "2.5", "category": "Eléctrico"}
        ]"#,
    );

    let importer = create_test_importer(ImportConfig::default());
    let outcome = importer.import_file(file.path()).await.unwrap();

    assert!(outcome.batch.committed);
    let cable = importer.repository().get_product("J-1").await.unwrap().unwrap();
    assert!(!cable.is_active);
    let plug = importer.repository().get_product("J-2").await.unwrap().unwrap();
    assert_eq!(plug.price, 2.5);
    assert_eq!(plug.category.as_deref(), Some("Eléctrico"));
}

#[tokio::test]
async fn test_import_invalid_file_records_uncommitted_batch() {
    logging::init_test();

    let content = csv_with_rows(&[
        ProductRowBuilder::new("D-1").build(),
        ProductRowBuilder::new("D-1").build(),
        ProductRowBuilder::new("D-2").name("").build(),
    ]);
    let file = create_temp_file(".csv", &content);

    let importer = create_test_importer(ImportConfig::default());
    let outcome = importer.import_file(file.path()).await.unwrap();

    assert!(!outcome.validation.is_valid);
    assert!(!outcome.batch.committed);
    assert_eq!(outcome.batch.blocked, 2);
    assert!(importer.repository().list_products().await.unwrap().is_empty());

    let batches = importer.repository().list_batches().await.unwrap();
    assert_eq!(batches.len(), 1);
    assert_eq!(batches[0].batch_id, outcome.batch.batch_id);
}

#[tokio::test]
async fn test_import_file_errors() {
    logging::init_test();
    let importer = create_test_importer(ImportConfig::default());

    let missing = importer.import_file("/nonexistent/products.csv").await;
    assert!(matches!(missing, Err(ImportError::FileNotFound(_))));

    let txt = create_temp_file(".txt", "SKU,Nombre\nA,B");
    let unsupported = importer.import_file(txt.path()).await;
    assert!(matches!(unsupported, Err(ImportError::UnsupportedFormat(_))));

    let broken = create_temp_file(".json", "{ not json");
    let parse = importer.import_file(broken.path()).await;
    assert!(matches!(parse, Err(ImportError::JsonParseError(_))));
}

#[tokio::test]
async fn test_batch_import_keeps_order_and_isolates_failures() {
    logging::init_test();

    let first = create_temp_file(".csv", &csv_with_rows(&[ProductRowBuilder::new("A").build()]));
    let second = create_temp_file(".json", r#"{"products": [{"sku": "B", "name": "Bee", "price": 1}]}"#);

    let importer = create_test_importer(ImportConfig::default());
    let results = importer
        .batch_import(vec![
            first.path().to_path_buf(),
            "/nonexistent/missing.csv".into(),
            second.path().to_path_buf(),
        ])
        .await;

    assert_eq!(results.len(), 3);
    assert!(results[0].as_ref().is_ok_and(|o| o.batch.committed));
    assert!(results[1]
        .as_ref()
        .is_err_and(|message| message.contains("missing.csv")));
    assert!(results[2].as_ref().is_ok_and(|o| o.batch.committed));

    assert_eq!(importer.repository().list_products().await.unwrap().len(), 2);
    assert_eq!(importer.repository().list_batches().await.unwrap().len(), 2);
}

#[tokio::test]
async fn test_reimport_counts_updates_and_keeps_created_at() {
    logging::init_test();
    let importer = create_test_importer(ImportConfig::default());

    importer
        .import_csv_text(&csv_with_rows(&[ProductRowBuilder::new("U-1").build()]), None)
        .await
        .unwrap();
    let before = importer.repository().get_product("U-1").await.unwrap().unwrap();

    let outcome = importer
        .import_csv_text(
            &csv_with_rows(&[
                ProductRowBuilder::new("U-1").price("99").build(),
                ProductRowBuilder::new("U-2").build(),
            ]),
            None,
        )
        .await
        .unwrap();

    assert_eq!(outcome.batch.created, 1);
    assert_eq!(outcome.batch.updated, 1);

    let after = importer.repository().get_product("U-1").await.unwrap().unwrap();
    assert_eq!(after.price, 99.0);
    assert_eq!(after.created_at, before.created_at);
}

#[tokio::test]
async fn test_configured_limits_and_default_unit() {
    logging::init_test();

    let config = ImportConfig {
        max_sku_length: 4,
        max_name_length: 200,
        default_unit: "caja".to_string(),
        row_numbering: RowNumbering::SourceLine,
    };
    let importer = create_test_importer(config);

    let outcome = importer
        .import_csv_text(
            &csv_with_rows(&[
                ProductRowBuilder::new("OK").unit("").build(),
                ProductRowBuilder::new("TOOLONG").build(),
            ]),
            None,
        )
        .await
        .unwrap();

    assert!(!outcome.batch.committed);
    assert_eq!(outcome.validation.errors.len(), 1);
    assert_eq!(outcome.validation.errors[0].row, 3);
    assert_eq!(
        outcome.validation.errors[0].message,
        "SKU muy largo (máximo 4 caracteres)"
    );

    let ok = importer
        .import_csv_text(
            &csv_with_rows(&[ProductRowBuilder::new("OK").unit("").build()]),
            None,
        )
        .await
        .unwrap();
    assert!(ok.batch.committed);
    let stored = importer.repository().get_product("OK").await.unwrap().unwrap();
    assert_eq!(stored.unit, "caja");
}

#[tokio::test]
async fn test_generated_templates_import_cleanly() {
    logging::init_test();
    let importer = create_test_importer(ImportConfig::default());

    let csv = generate_template(TemplateFormat::Csv).unwrap().to_text().unwrap();
    let csv_outcome = importer.import_csv_text(&csv, None).await.unwrap();
    assert!(csv_outcome.validation.is_valid);
    assert_eq!(csv_outcome.batch.created, 2);

    let json = generate_template(TemplateFormat::Json).unwrap().to_text().unwrap();
    let json_outcome = importer.import_json_text(&json, None).await.unwrap();
    assert!(json_outcome.validation.is_valid);
    assert_eq!(json_outcome.batch.updated, 2);

    let bolt = importer.repository().get_product("PROD001").await.unwrap().unwrap();
    assert_eq!(bolt.name, "Tornillo hexagonal");
}
