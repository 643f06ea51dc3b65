// ==========================================
// Repository 层集成测试
// ==========================================
// 测试目标: 生产记录与主数据在真实 SQLite 文件上的读写
// ==========================================


use cnc_kpi::domain::{NewProductModel, NewWorker, ProductionFilter};
use cnc_kpi::repository::{
    ModelRepository, ProductionRepository, RecordOrder, RepositoryError, WorkerRepository,
};
use test_helpers::{create_test_db, date, new_record};

#[test]
fn test_production_crud_roundtrip() {
    let (_temp_file, db_path) = create_test_db().expect("Failed to create test db");
    let repo = ProductionRepository::new(&db_path).expect("Failed to create repo");

    let id = repo
        .insert(&new_record(date(2024, 5, 1), "Kim", "B-03", 100, 97, 2))
        .unwrap();
    let stored = repo.find_by_id(id).unwrap().expect("record should exist");
    assert_eq!(stored.worker, "Kim");
    assert_eq!(stored.produced_quantity, 97);

    // 整条覆盖
    let mut changed = new_record(date(2024, 5, 2), "Kim", "B-04", 120, 118, 1);
    changed.note = Some("야간".to_string());
    let updated = repo.update(id, &changed).unwrap();
    assert_eq!(updated.line, "B-04");
    assert_eq!(repo.find_by_id(id).unwrap().unwrap().note.as_deref(), Some("야간"));

    repo.delete(id).unwrap();
    assert!(repo.find_by_id(id).unwrap().is_none());
    assert_eq!(repo.count().unwrap(), 0);
}

#[test]
fn test_update_and_delete_missing_id_is_not_found() {
    let (_temp_file, db_path) = create_test_db().expect("Failed to create test db");
    let repo = ProductionRepository::new(&db_path).unwrap();

    let record = new_record(date(2024, 5, 1), "Kim", "B-03", 100, 97, 2);
    assert!(matches!(
        repo.update(999, &record),
        Err(RepositoryError::NotFound { .. })
    ));
    assert!(matches!(repo.delete(999), Err(RepositoryError::NotFound { .. })));
}

#[test]
fn test_find_filters_and_orders() {
    let (_temp_file, db_path) = create_test_db().expect("Failed to create test db");
    let repo = ProductionRepository::new(&db_path).unwrap();

    let inserted = repo
        .batch_insert(&[
            new_record(date(2024, 5, 1), "Kim", "B-03", 100, 97, 2),
            new_record(date(2024, 5, 3), "Lee", "B-04", 100, 90, 1),
            new_record(date(2024, 5, 2), "Kim", "B-03", 100, 99, 0),
            new_record(date(2024, 6, 1), "Park", "B-05", 100, 80, 3),
        ])
        .unwrap();
    assert_eq!(inserted, 4);

    // 日期闭区间，日期降序
    let may = repo
        .find(&ProductionFilter::between(date(2024, 5, 1), date(2024, 5, 31)))
        .unwrap();
    let dates: Vec<_> = may.iter().map(|r| r.date).collect();
    assert_eq!(dates, vec![date(2024, 5, 3), date(2024, 5, 2), date(2024, 5, 1)]);

    // 写入顺序
    let may_insertion = repo
        .find_ordered(
            &ProductionFilter::between(date(2024, 5, 1), date(2024, 5, 31)),
            RecordOrder::Insertion,
        )
        .unwrap();
    let dates: Vec<_> = may_insertion.iter().map(|r| r.date).collect();
    assert_eq!(dates, vec![date(2024, 5, 1), date(2024, 5, 3), date(2024, 5, 2)]);

    // 作业员精确匹配
    let kim = repo
        .find(&ProductionFilter::default().worker("Kim"))
        .unwrap();
    assert_eq!(kim.len(), 2);

    let kim_b05 = repo
        .find(&ProductionFilter::default().worker("Kim").line("B-05"))
        .unwrap();
    assert!(kim_b05.is_empty());
}

#[test]
fn test_delete_before_is_strict() {
    let (_temp_file, db_path) = create_test_db().expect("Failed to create test db");
    let repo = ProductionRepository::new(&db_path).unwrap();

    repo.batch_insert(&[
        new_record(date(2024, 1, 31), "Kim", "B-03", 100, 97, 2),
        new_record(date(2024, 2, 1), "Kim", "B-03", 100, 97, 2),
        new_record(date(2024, 3, 1), "Kim", "B-03", 100, 97, 2),
    ])
    .unwrap();

    let deleted = repo.delete_before(date(2024, 2, 1)).unwrap();
    assert_eq!(deleted, 1);
    assert_eq!(repo.count().unwrap(), 2);
}

#[test]
fn test_worker_repository() {
    let (_temp_file, db_path) = create_test_db().expect("Failed to create test db");
    let repo = WorkerRepository::new(&db_path).unwrap();

    let lee = repo
        .insert(&NewWorker {
            employee_no: "E002".to_string(),
            name: "Lee".to_string(),
            department: None,
            line: "B-04".to_string(),
        })
        .unwrap();
    assert_eq!(lee.department, "CNC");

    repo.insert(&NewWorker {
        employee_no: "E001".to_string(),
        name: "Kim".to_string(),
        department: Some("MCT".to_string()),
        line: "B-03".to_string(),
    })
    .unwrap();

    // 工号唯一
    let duplicate = repo.insert(&NewWorker {
        employee_no: "E001".to_string(),
        name: "Park".to_string(),
        department: None,
        line: "B-05".to_string(),
    });
    assert!(matches!(
        duplicate,
        Err(RepositoryError::UniqueConstraintViolation(_))
    ));

    let names: Vec<String> = repo.list_all().unwrap().into_iter().map(|w| w.name).collect();
    assert_eq!(names, vec!["Kim", "Lee"]);
    assert_eq!(repo.count().unwrap(), 2);

    repo.delete(lee.id).unwrap();
    assert!(repo.find_by_id(lee.id).unwrap().is_none());
}

#[test]
fn test_model_repository() {
    let (_temp_file, db_path) = create_test_db().expect("Failed to create test db");
    let repo = ModelRepository::new(&db_path).unwrap();

    let m2 = repo
        .insert(&NewProductModel {
            model: "M-200".to_string(),
            process: "OP10".to_string(),
        })
        .unwrap();
    repo.insert(&NewProductModel {
        model: "M-100".to_string(),
        process: "OP20".to_string(),
    })
    .unwrap();

    let updated = repo
        .update(
            m2.id,
            &NewProductModel {
                model: "M-200".to_string(),
                process: "OP30".to_string(),
            },
        )
        .unwrap();
    assert_eq!(updated.process, "OP30");

    let models: Vec<String> = repo.list_all().unwrap().into_iter().map(|m| m.model).collect();
    assert_eq!(models, vec!["M-100", "M-200"]);
    assert_eq!(repo.count().unwrap(), 2);
}
