use ideabank_core::{
    open_db_in_memory, Idea, IdeaPatch, IdeaRepository, RepoError, SqliteIdeaRepository,
};

fn idea(id: i64, title: &str, description: &str) -> Idea {
    Idea {
        id,
        title: title.to_string(),
        description: description.to_string(),
    }
}

#[test]
fn insert_and_get_roundtrip() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteIdeaRepository::try_new(&conn).unwrap();

    let stored = idea(1, "Idea 1", "Description 1");
    repo.insert_idea(&stored).unwrap();

    assert_eq!(repo.get_idea(1).unwrap(), stored);
}

#[test]
fn insert_existing_id_fails_with_duplicate_identity() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteIdeaRepository::try_new(&conn).unwrap();

    repo.insert_idea(&idea(7, "first", "original row")).unwrap();
    let err = repo
        .insert_idea(&idea(7, "second", "colliding row"))
        .unwrap_err();

    assert!(matches!(err, RepoError::DuplicateIdentity(7)));
    assert_eq!(repo.get_idea(7).unwrap().title, "first");
}

#[test]
fn list_is_ascending_by_id_regardless_of_insert_order() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteIdeaRepository::try_new(&conn).unwrap();

    assert!(repo.list_ideas().unwrap().is_empty());

    for id in [3, 1, 2] {
        repo.insert_idea(&idea(id, &format!("Idea {id}"), "body text"))
            .unwrap();
    }

    let ids = repo
        .list_ideas()
        .unwrap()
        .into_iter()
        .map(|idea| idea.id)
        .collect::<Vec<_>>();
    assert_eq!(ids, vec![1, 2, 3]);
}

#[test]
fn update_title_only_preserves_description() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteIdeaRepository::try_new(&conn).unwrap();
    repo.insert_idea(&idea(1, "Idea 1", "Description 1")).unwrap();

    let updated = repo
        .update_idea(1, &IdeaPatch::title("Updated Title"))
        .unwrap();

    assert_eq!(updated, idea(1, "Updated Title", "Description 1"));
    assert_eq!(repo.get_idea(1).unwrap(), updated);
}

#[test]
fn update_with_both_fields_and_with_none() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteIdeaRepository::try_new(&conn).unwrap();
    repo.insert_idea(&idea(1, "Idea 1", "Description 1")).unwrap();

    let unchanged = repo.update_idea(1, &IdeaPatch::default()).unwrap();
    assert_eq!(unchanged, idea(1, "Idea 1", "Description 1"));

    let patch = IdeaPatch {
        title: Some("New title".to_string()),
        description: Some("New description".to_string()),
    };
    let updated = repo.update_idea(1, &patch).unwrap();
    assert_eq!(updated, idea(1, "New title", "New description"));
}

#[test]
fn update_writes_supplied_values_verbatim() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteIdeaRepository::try_new(&conn).unwrap();
    repo.insert_idea(&idea(1, "Idea 1", "Description 1")).unwrap();

    let updated = repo.update_idea(1, &IdeaPatch::description("")).unwrap();
    assert_eq!(updated.description, "");
    assert_eq!(updated.title, "Idea 1");
}

#[test]
fn delete_removes_only_target() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteIdeaRepository::try_new(&conn).unwrap();
    repo.insert_idea(&idea(1, "keep", "stays around")).unwrap();
    repo.insert_idea(&idea(2, "drop", "goes away")).unwrap();

    repo.delete_idea(2).unwrap();

    assert!(matches!(repo.get_idea(2), Err(RepoError::NotFound(2))));
    assert_eq!(repo.list_ideas().unwrap(), vec![idea(1, "keep", "stays around")]);
}

#[test]
fn delete_all_empties_store_and_reports_count() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteIdeaRepository::try_new(&conn).unwrap();
    repo.insert_idea(&idea(1, "one", "first row")).unwrap();
    repo.insert_idea(&idea(2, "two", "second row")).unwrap();

    assert_eq!(repo.delete_all_ideas().unwrap(), 2);
    assert!(repo.list_ideas().unwrap().is_empty());
    assert_eq!(repo.delete_all_ideas().unwrap(), 0);
}

#[test]
fn missing_id_fails_with_not_found_for_every_keyed_operation() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteIdeaRepository::try_new(&conn).unwrap();
    repo.insert_idea(&idea(1, "present", "not the target")).unwrap();

    assert!(matches!(repo.get_idea(404), Err(RepoError::NotFound(404))));
    assert!(matches!(
        repo.update_idea(404, &IdeaPatch::title("whatever")),
        Err(RepoError::NotFound(404))
    ));
    assert!(matches!(
        repo.update_idea(404, &IdeaPatch::default()),
        Err(RepoError::NotFound(404))
    ));
    assert!(matches!(repo.delete_idea(404), Err(RepoError::NotFound(404))));
}
