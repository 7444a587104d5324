use quiz_core::db::open_db_in_memory;
use quiz_core::{
    QuizRepository, QuizService, QuizValidationError, RepoError, SqliteQuizRepository,
    DEFAULT_QUIZZES,
};
use rusqlite::Connection;

fn service(conn: &Connection) -> QuizService<SqliteQuizRepository<'_>> {
    QuizService::new(SqliteQuizRepository::try_new(conn).unwrap())
}

#[test]
fn create_then_find_returns_same_fields() {
    let conn = open_db_in_memory().unwrap();
    let store = service(&conn);

    let created = store.create("2+2", "4").unwrap();
    let found = store.find_by_id(created.id).unwrap().unwrap();
    assert_eq!(found.question, "2+2");
    assert_eq!(found.answer, "4");
    assert_eq!(found, created);
}

#[test]
fn find_missing_id_returns_none() {
    let conn = open_db_in_memory().unwrap();
    assert!(service(&conn).find_by_id(404).unwrap().is_none());
}

#[test]
fn create_rejects_empty_fields_without_writing() {
    let conn = open_db_in_memory().unwrap();
    let store = service(&conn);

    let err = store.create("", "4").unwrap_err();
    assert!(matches!(
        err,
        RepoError::Validation(QuizValidationError::EmptyQuestion)
    ));
    let err = store.create("2+2", "").unwrap_err();
    assert!(matches!(
        err,
        RepoError::Validation(QuizValidationError::EmptyAnswer)
    ));
    assert_eq!(store.count().unwrap(), 0);
}

#[test]
fn seeding_empty_store_inserts_capitals_once() {
    let conn = open_db_in_memory().unwrap();
    let store = service(&conn);

    assert_eq!(store.seed_defaults_if_empty().unwrap(), 4);
    assert_eq!(store.seed_defaults_if_empty().unwrap(), 0);

    let all = store.list_all().unwrap();
    assert_eq!(all.len(), DEFAULT_QUIZZES.len());
    assert_eq!(all[0].question, "Capital de Italia");
    assert_eq!(all[0].answer, "Roma");
    assert!(all
        .iter()
        .any(|quiz| quiz.question == "Capital de Portugal" && quiz.answer == "Lisboa"));
}

#[test]
fn seeding_is_skipped_when_any_record_exists() {
    let conn = open_db_in_memory().unwrap();
    let store = service(&conn);
    store.create("2+2", "4").unwrap();

    assert_eq!(store.seed_defaults_if_empty().unwrap(), 0);
    assert_eq!(store.count().unwrap(), 1);
}

#[test]
fn duplicate_question_on_seeded_store_is_rejected() {
    let conn = open_db_in_memory().unwrap();
    let store = service(&conn);
    store.seed_defaults_if_empty().unwrap();

    let err = store.create("Capital de Italia", "Roma").unwrap_err();
    assert!(matches!(
        err,
        RepoError::Validation(QuizValidationError::DuplicateQuestion(ref question))
            if question == "Capital de Italia"
    ));
    assert_eq!(store.count().unwrap(), 4);
}

#[test]
fn list_all_follows_insertion_order() {
    let conn = open_db_in_memory().unwrap();
    let store = service(&conn);
    let third = store.create("c", "3").unwrap();
    let first = store.create("a", "1").unwrap();
    let second = store.create("b", "2").unwrap();

    let ids: Vec<_> = store.list_all().unwrap().into_iter().map(|q| q.id).collect();
    assert_eq!(ids, vec![third.id, first.id, second.id]);
}

#[test]
fn update_replaces_both_fields() {
    let conn = open_db_in_memory().unwrap();
    let store = service(&conn);
    let quiz = store.create("2+2", "4").unwrap();

    let updated = store.update(quiz.id, "3+3", "6").unwrap();
    assert_eq!(updated.id, quiz.id);

    let loaded = store.find_by_id(quiz.id).unwrap().unwrap();
    assert_eq!(loaded.question, "3+3");
    assert_eq!(loaded.answer, "6");
}

#[test]
fn update_may_keep_its_own_question() {
    let conn = open_db_in_memory().unwrap();
    let store = service(&conn);
    let quiz = store.create("2+2", "4").unwrap();

    store.update(quiz.id, "2+2", "four").unwrap();
    assert_eq!(store.find_by_id(quiz.id).unwrap().unwrap().answer, "four");
}

#[test]
fn update_missing_id_returns_not_found_and_changes_nothing() {
    let conn = open_db_in_memory().unwrap();
    let store = service(&conn);
    store.create("2+2", "4").unwrap();

    let err = store.update(999, "", "").unwrap_err();
    assert!(matches!(err, RepoError::NotFound(999)));
    assert_eq!(store.count().unwrap(), 1);
}

#[test]
fn failed_update_leaves_record_untouched() {
    let conn = open_db_in_memory().unwrap();
    let store = service(&conn);
    let first = store.create("2+2", "4").unwrap();
    store.create("3+3", "6").unwrap();

    let err = store.update(first.id, "3+3", "new answer").unwrap_err();
    assert!(matches!(
        err,
        RepoError::Validation(QuizValidationError::DuplicateQuestion(_))
    ));
    let err = store.update(first.id, "5+5", "").unwrap_err();
    assert!(matches!(
        err,
        RepoError::Validation(QuizValidationError::EmptyAnswer)
    ));

    let loaded = store.find_by_id(first.id).unwrap().unwrap();
    assert_eq!(loaded, first);
}

#[test]
fn delete_is_idempotent_and_reports_removal() {
    let conn = open_db_in_memory().unwrap();
    let store = service(&conn);
    let quiz = store.create("2+2", "4").unwrap();

    assert!(store.delete(quiz.id).unwrap());
    assert!(!store.delete(quiz.id).unwrap());
    assert!(store.find_by_id(quiz.id).unwrap().is_none());
}

#[test]
fn delete_unknown_id_returns_false() {
    let conn = open_db_in_memory().unwrap();
    assert!(!service(&conn).delete(12345).unwrap());
}

#[test]
fn ids_are_not_reused_after_delete() {
    let conn = open_db_in_memory().unwrap();
    let store = service(&conn);
    let first = store.create("2+2", "4").unwrap();
    store.delete(first.id).unwrap();

    let second = store.create("2+2", "4").unwrap();
    assert!(second.id > first.id);
}

#[test]
fn check_answer_is_exact_and_read_only() {
    let conn = open_db_in_memory().unwrap();
    let store = service(&conn);
    store.seed_defaults_if_empty().unwrap();
    let italy = store.list_all().unwrap().remove(0);

    assert!(store.check_answer(italy.id, "Roma").unwrap());
    assert!(!store.check_answer(italy.id, "roma").unwrap());
    assert!(matches!(
        store.check_answer(999, "Roma").unwrap_err(),
        RepoError::NotFound(999)
    ));
    assert_eq!(store.count().unwrap(), 4);
}

#[test]
fn repository_rejects_uninitialized_connection() {
    let conn = Connection::open_in_memory().unwrap();

    match SqliteQuizRepository::try_new(&conn) {
        Err(RepoError::UninitializedConnection {
            expected_version,
            actual_version: 0,
        }) => assert!(expected_version > 0),
        Err(other) => panic!("unexpected error: {other}"),
        Ok(_) => panic!("expected uninitialized connection error"),
    }
}

#[test]
fn repository_rejects_connection_without_quizzes_table() {
    let conn = Connection::open_in_memory().unwrap();
    conn.execute_batch(&format!(
        "PRAGMA user_version = {};",
        quiz_core::db::migrations::latest_version()
    ))
    .unwrap();

    assert!(matches!(
        SqliteQuizRepository::try_new(&conn),
        Err(RepoError::MissingRequiredTable("quizzes"))
    ));
}

#[test]
fn repository_trait_is_usable_directly() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteQuizRepository::try_new(&conn).unwrap();
    let created = repo
        .create_quiz(&quiz_core::QuizDraft::new("2+2", "4"))
        .unwrap();
    assert_eq!(repo.count_quizzes().unwrap(), 1);
    assert_eq!(repo.list_quizzes().unwrap(), vec![created]);
}

#[test]
fn quiz_serializes_with_plain_field_names() {
    let conn = open_db_in_memory().unwrap();
    let quiz = service(&conn).create("2+2", "4").unwrap();

    let value = serde_json::to_value(&quiz).unwrap();
    assert_eq!(value["question"], "2+2");
    assert_eq!(value["answer"], "4");
    assert_eq!(value["id"], quiz.id);
}
