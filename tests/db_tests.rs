use chrono::NaiveDate;
use contacts::db::*;
use contacts::model::*;

fn setup() -> rusqlite::Connection {
    schema::test_connection()
}

fn insert_contact(conn: &rusqlite::Connection, first: &str, last: &str) -> Contact {
    let contact = Contact::create(first.into(), last.into());
    contact_repo::insert(conn, &contact).unwrap();
    contact
}

// ==========================================================================
// SCHEMA TESTS
// ==========================================================================

#[test]
fn schema_initializes_without_error() {
    let _conn = setup();
}

#[test]
fn schema_is_idempotent() {
    let conn = setup();
    schema::initialize(&conn).unwrap();
    schema::initialize(&conn).unwrap();
}

#[test]
fn schema_rejects_unknown_phone_type() {
    let conn = setup();
    let contact = insert_contact(&conn, "Jane", "Doe");
    let result = conn.execute(
        "INSERT INTO contact_phones (id, contact_id, phone, phone_type) VALUES ('x', ?1, '1', 'Fax')",
        rusqlite::params![contact.id.to_db()],
    );
    assert!(result.is_err());
}

#[test]
fn schema_rejects_orphan_child_rows() {
    let conn = setup();
    let email = ContactEmail::create(Id::generate(), "jane@x.com".into());
    assert!(detail_repo::insert_email(&conn, &email).is_err());
}

// ==========================================================================
// CONTACT REPO TESTS
// ==========================================================================

#[test]
fn insert_and_find_contact() {
    let conn = setup();
    let mut contact = Contact::create("Jane".into(), "Doe".into());
    contact.address = Some("1 Main St".into());
    contact.birthday = NaiveDate::from_ymd_opt(1990, 5, 15);
    contact.notes = Some("met at conf".into());
    contact_repo::insert(&conn, &contact).unwrap();

    let found = contact_repo::find_by_id(&conn, contact.id).unwrap().unwrap();
    assert_eq!(found, contact);
}

#[test]
fn find_missing_contact_returns_none() {
    let conn = setup();
    assert!(contact_repo::find_by_id(&conn, Id::generate()).unwrap().is_none());
}

#[test]
fn find_all_keeps_creation_order() {
    let conn = setup();
    insert_contact(&conn, "Zed", "Last");
    insert_contact(&conn, "Amy", "First");
    insert_contact(&conn, "Mia", "Middle");

    let names: Vec<String> = contact_repo::find_all(&conn)
        .unwrap()
        .iter()
        .map(|c| c.first_name.clone())
        .collect();
    assert_eq!(names, vec!["Zed", "Amy", "Mia"]);
}

#[test]
fn update_contact_persists() {
    let conn = setup();
    let mut contact = insert_contact(&conn, "Jane", "Doe");
    contact.last_name = "Smith".into();
    contact.birthday = NaiveDate::from_ymd_opt(2000, 2, 29);
    contact_repo::update(&conn, &contact).unwrap();

    let found = contact_repo::find_by_id(&conn, contact.id).unwrap().unwrap();
    assert_eq!(found.last_name, "Smith");
    assert_eq!(found.birthday, NaiveDate::from_ymd_opt(2000, 2, 29));
}

#[test]
fn find_by_name_is_case_insensitive_and_matches_full_name() {
    let conn = setup();
    insert_contact(&conn, "Jane", "Doe");
    insert_contact(&conn, "John", "Roe");

    assert_eq!(contact_repo::find_by_name(&conn, "JANE").unwrap().len(), 1);
    assert_eq!(contact_repo::find_by_name(&conn, "jane doe").unwrap().len(), 1);
    assert_eq!(contact_repo::find_by_name(&conn, "oe").unwrap().len(), 2);
    assert!(contact_repo::find_by_name(&conn, "nobody").unwrap().is_empty());
}

#[test]
fn delete_contact_cascades_to_children() {
    let conn = setup();
    let contact = insert_contact(&conn, "Jane", "Doe");
    detail_repo::insert_email(&conn, &ContactEmail::create(contact.id, "jane@x.com".into())).unwrap();
    detail_repo::insert_phone(
        &conn,
        &ContactPhone::create(contact.id, "555-1234".into(), PhoneType::Mobile),
    )
    .unwrap();
    detail_repo::insert_organization(&conn, &ContactOrganization::create(contact.id, "Acme".into()))
        .unwrap();

    assert!(contact_repo::delete(&conn, contact.id).unwrap());
    assert!(detail_repo::all_emails(&conn).unwrap().is_empty());
    assert!(detail_repo::all_phones(&conn).unwrap().is_empty());
    assert!(detail_repo::all_organizations(&conn).unwrap().is_empty());
    assert!(!contact_repo::delete(&conn, contact.id).unwrap());
}

// ==========================================================================
// DETAIL REPO TESTS
// ==========================================================================

#[test]
fn detail_rows_round_trip() {
    let conn = setup();
    let contact = insert_contact(&conn, "Jane", "Doe");

    let phone = ContactPhone::create(contact.id, "555-0000".into(), PhoneType::Telephone);
    detail_repo::insert_phone(&conn, &phone).unwrap();

    let mut org = ContactOrganization::create(contact.id, "Acme".into());
    org.designation = Some("Eng Lead".into());
    org.team = Some("Eng".into());
    detail_repo::insert_organization(&conn, &org).unwrap();

    let url = ContactUrl::create(contact.id, "https://jane.dev".into());
    detail_repo::insert_url(&conn, &url).unwrap();

    let link = ContactSocialLink::create(contact.id, "https://social.example/jane".into());
    detail_repo::insert_social_link(&conn, &link).unwrap();

    let name = ContactAssociatedName::create(contact.id, "Tom".into());
    detail_repo::insert_associated_name(&conn, &name).unwrap();

    assert_eq!(detail_repo::find_phones(&conn, contact.id).unwrap(), vec![phone]);
    assert_eq!(detail_repo::find_organizations(&conn, contact.id).unwrap(), vec![org]);
    assert_eq!(detail_repo::find_urls(&conn, contact.id).unwrap(), vec![url]);
    assert_eq!(detail_repo::find_social_links(&conn, contact.id).unwrap(), vec![link]);
    assert_eq!(detail_repo::find_associated_names(&conn, contact.id).unwrap(), vec![name]);
}

#[test]
fn detail_rows_keep_insertion_order() {
    let conn = setup();
    let contact = insert_contact(&conn, "Jane", "Doe");
    for email in ["z@x.com", "a@x.com", "m@x.com"] {
        detail_repo::insert_email(&conn, &ContactEmail::create(contact.id, email.into())).unwrap();
    }

    let emails: Vec<String> = detail_repo::find_emails(&conn, contact.id)
        .unwrap()
        .into_iter()
        .map(|e| e.email)
        .collect();
    assert_eq!(emails, vec!["z@x.com", "a@x.com", "m@x.com"]);
}

#[test]
fn delete_detail_reports_whether_removed() {
    let conn = setup();
    let contact = insert_contact(&conn, "Jane", "Doe");
    let email = ContactEmail::create(contact.id, "jane@x.com".into());
    detail_repo::insert_email(&conn, &email).unwrap();

    assert!(detail_repo::delete_email(&conn, email.id).unwrap());
    assert!(!detail_repo::delete_email(&conn, email.id).unwrap());
}

#[test]
fn distinct_names_are_sorted_and_skip_missing_teams() {
    let conn = setup();
    let a = insert_contact(&conn, "Ann", "A");
    let b = insert_contact(&conn, "Ben", "B");

    let mut globex = ContactOrganization::create(a.id, "Globex".into());
    globex.team = Some("Sales".into());
    detail_repo::insert_organization(&conn, &globex).unwrap();

    let mut acme = ContactOrganization::create(b.id, "Acme".into());
    acme.team = Some("Eng".into());
    detail_repo::insert_organization(&conn, &acme).unwrap();
    detail_repo::insert_organization(&conn, &ContactOrganization::create(a.id, "Acme".into()))
        .unwrap();

    assert_eq!(detail_repo::distinct_organization_names(&conn).unwrap(), vec!["Acme", "Globex"]);
    assert_eq!(detail_repo::distinct_team_names(&conn).unwrap(), vec!["Eng", "Sales"]);
}

// ==========================================================================
// EXPORT REPO TESTS
// ==========================================================================

#[test]
fn join_rows_cross_every_collection() {
    let conn = setup();
    let contact = insert_contact(&conn, "Jane", "Doe");
    for email in ["a@x.com", "b@x.com"] {
        detail_repo::insert_email(&conn, &ContactEmail::create(contact.id, email.into())).unwrap();
    }
    for org in ["Acme", "Globex"] {
        detail_repo::insert_organization(&conn, &ContactOrganization::create(contact.id, org.into()))
            .unwrap();
    }
    for name in ["Tom", "Ana", "Lee"] {
        detail_repo::insert_associated_name(
            &conn,
            &ContactAssociatedName::create(contact.id, name.into()),
        )
        .unwrap();
    }
    insert_contact(&conn, "Solo", "");

    let rows = export_repo::fetch_join_rows(&conn).unwrap();
    assert_eq!(rows.len(), 2 * 2 * 3 + 1);
    assert!(rows[..12].iter().all(|r| r.contact_id == contact.id));
    assert_eq!(rows[12].first_name, "Solo");
    assert_eq!(rows[12].email, None);
}

#[test]
fn join_rows_carry_contact_scalars() {
    let conn = setup();
    let mut contact = Contact::create("Jane".into(), "Doe".into());
    contact.birthday = NaiveDate::from_ymd_opt(1990, 5, 15);
    contact.notes = Some("hi".into());
    contact_repo::insert(&conn, &contact).unwrap();
    detail_repo::insert_phone(
        &conn,
        &ContactPhone::create(contact.id, "555".into(), PhoneType::Telephone),
    )
    .unwrap();

    let rows = export_repo::fetch_join_rows(&conn).unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].birthday, contact.birthday);
    assert_eq!(rows[0].notes.as_deref(), Some("hi"));
    assert_eq!(rows[0].phone.as_deref(), Some("555"));
    assert_eq!(rows[0].phone_type, Some(PhoneType::Telephone));
}

#[test]
fn fetch_all_details_groups_by_contact() {
    let conn = setup();
    let jane = insert_contact(&conn, "Jane", "Doe");
    let bob = insert_contact(&conn, "Bob", "Roe");
    detail_repo::insert_email(&conn, &ContactEmail::create(bob.id, "bob@x.com".into())).unwrap();
    detail_repo::insert_email(&conn, &ContactEmail::create(jane.id, "jane@x.com".into())).unwrap();

    let details = export_repo::fetch_all_details(&conn).unwrap();
    assert_eq!(details.len(), 2);
    assert_eq!(details[0].contact.id, jane.id);
    assert_eq!(details[0].emails[0].email, "jane@x.com");
    assert_eq!(details[1].emails[0].email, "bob@x.com");
}
