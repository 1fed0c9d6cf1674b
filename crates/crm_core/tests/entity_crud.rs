use crm_core::{
    Contact, ContactDraft, ContactPatch, ContactStatus, CrmStore, Deal, DealDraft, DealPatch,
    DealStage, Entity, RepoError, SeedData, StoreConfig, TaskDraft, TaskPriority, TaskStatus,
};
use chrono::{TimeZone, Utc};

fn contact(id: i64, name: &str) -> Contact {
    Contact::from_draft(id, ContactDraft::new(name, ContactStatus::Active))
}

fn store_with_contacts(ids: &[i64]) -> CrmStore {
    let seed = SeedData {
        contacts: ids.iter().map(|id| contact(*id, &format!("seed-{id}"))).collect(),
        ..SeedData::default()
    };
    CrmStore::with_seed(seed, StoreConfig::instant()).unwrap()
}

fn deal_draft(contact_id: i64) -> DealDraft {
    DealDraft {
        title: "Renewal".to_string(),
        value: 1000.0,
        stage: DealStage::Lead,
        contact_id,
        probability: 10,
        close_date: Utc.with_ymd_and_hms(2024, 6, 1, 0, 0, 0).unwrap(),
        notes: String::new(),
        created_at: Utc.with_ymd_and_hms(2024, 3, 1, 0, 0, 0).unwrap(),
    }
}

#[tokio::test]
async fn create_delete_scenario_keeps_order_and_ids() {
    let store = store_with_contacts(&[1, 2]);
    let contacts = store.contacts();

    let created = contacts
        .create(ContactDraft::new("X", ContactStatus::Lead))
        .await
        .unwrap();
    assert_eq!(created.id, 3);
    assert_eq!(created.name, "X");

    assert!(contacts.delete(1).await.unwrap());
    let err = contacts.get_by_id(1).await.unwrap_err();
    assert_eq!(err, RepoError::NotFound { kind: "Contact", id: 1 });

    let ids: Vec<i64> = contacts
        .get_all()
        .await
        .unwrap()
        .iter()
        .map(|c| c.id)
        .collect();
    assert_eq!(ids, vec![2, 3]);
}

#[tokio::test]
async fn ids_strictly_increase_across_deletes() {
    let store = store_with_contacts(&[]);
    let contacts = store.contacts();

    let mut last_seen = 0;
    for round in 0..5 {
        let created = contacts
            .create(ContactDraft::new(format!("c{round}"), ContactStatus::Lead))
            .await
            .unwrap();
        assert!(created.id > last_seen);
        last_seen = created.id;
        if round % 2 == 0 {
            contacts.delete(created.id).await.unwrap();
        }
    }
    assert_eq!(last_seen, 5);
}

#[tokio::test]
async fn returned_records_are_isolated_copies() {
    let store = store_with_contacts(&[1]);
    let contacts = store.contacts();
    let before = contacts.get_all().await.unwrap();

    let mut listed = contacts.get_all().await.unwrap();
    listed[0].name = "mutated".to_string();
    let mut fetched = contacts.get_by_id(1).await.unwrap();
    fetched.tags.push("mutated".to_string());
    let mut created = contacts
        .create(ContactDraft::new("new", ContactStatus::Lead))
        .await
        .unwrap();
    created.email = "mutated@example.com".to_string();
    let mut updated = contacts
        .update(1, ContactPatch::default())
        .await
        .unwrap();
    updated.company = "mutated".to_string();

    let after = contacts.get_all().await.unwrap();
    assert_eq!(after[0], before[0]);
    assert_eq!(after[1].email, "");
}

#[tokio::test]
async fn update_changes_only_patched_fields() {
    let store = store_with_contacts(&[]);
    let deals = store.deals();
    let original: Deal = deals.create(deal_draft(1)).await.unwrap();

    let updated = deals
        .update(
            original.id,
            DealPatch {
                stage: Some(DealStage::Negotiation),
                ..DealPatch::default()
            },
        )
        .await
        .unwrap();

    assert_eq!(updated.id, original.id);
    assert_eq!(updated.stage, DealStage::Negotiation);
    assert_eq!(updated.title, original.title);
    assert_eq!(updated.value, original.value);
    assert_eq!(updated.close_date, original.close_date);
    assert_eq!(deals.get_by_id(original.id).await.unwrap(), updated);
}

#[tokio::test]
async fn unvalidated_values_are_accepted() {
    let store = store_with_contacts(&[]);
    let mut draft = deal_draft(404);
    draft.value = -50.0;
    draft.probability = 250;

    let created = store.deals().create(draft).await.unwrap();
    assert_eq!(created.contact_id, 404);
    assert_eq!(created.value, -50.0);
    assert_eq!(created.probability, 250);
}

#[tokio::test]
async fn missing_ids_fail_identically_for_never_created_and_deleted() {
    let store = store_with_contacts(&[1]);
    let contacts = store.contacts();
    contacts.delete(1).await.unwrap();

    for id in [1, 77] {
        let expected = RepoError::NotFound { kind: "Contact", id };
        assert_eq!(contacts.get_by_id(id).await.unwrap_err(), expected);
        assert_eq!(
            contacts
                .update(id, ContactPatch::default())
                .await
                .unwrap_err(),
            expected
        );
        assert_eq!(contacts.delete(id).await.unwrap_err(), expected);
    }
}

#[tokio::test]
async fn deleting_a_contact_does_not_cascade() {
    let store = store_with_contacts(&[1]);
    store.deals().create(deal_draft(1)).await.unwrap();
    store
        .tasks()
        .create(TaskDraft {
            title: "Follow up".to_string(),
            description: String::new(),
            due_date: Utc.with_ymd_and_hms(2024, 4, 1, 0, 0, 0).unwrap(),
            priority: TaskPriority::Medium,
            status: TaskStatus::Pending,
            contact_id: Some(1),
            assignee: "Sam".to_string(),
        })
        .await
        .unwrap();

    store.contacts().delete(1).await.unwrap();

    assert_eq!(store.deals().get_all().await.unwrap().len(), 1);
    let tasks = store.tasks().get_all().await.unwrap();
    assert_eq!(tasks[0].contact_id, Some(1));
}

#[tokio::test]
async fn store_clones_share_collections() {
    let store = store_with_contacts(&[1]);
    let handle = store.clone();
    handle.contacts().delete(1).await.unwrap();
    assert!(store.contacts().get_all().await.unwrap().is_empty());
}
