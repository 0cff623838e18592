//! Grouping of filtered contact data into one accumulator per contact.
//!
//! Two inputs are supported and produce the same aggregates: the flat rows of
//! the multi-way join, and contacts fetched with their collections
//! separately. Membership filtering is decided per organization membership,
//! before anything is accumulated.

use std::collections::{HashMap, HashSet};
use std::hash::Hash;

use super::render::ExportRow;
use super::request::ExportFilter;
use crate::db::export_repo::ExportJoinRow;
use crate::model::{Contact, ContactDetails, ContactOrganization, ContactPhone, Id, PhoneType};

/// Separator placed between the members of a flattened collection.
pub const LIST_SEPARATOR: &str = ", ";

/// Duplicate-free collection that remembers first-insertion order.
#[derive(Debug, Clone)]
pub struct OrderedSet<T> {
    items: Vec<T>,
    seen: HashSet<T>,
}

impl<T: Clone + Eq + Hash> OrderedSet<T> {
    pub fn new() -> Self {
        Self {
            items: Vec::new(),
            seen: HashSet::new(),
        }
    }

    /// Returns false when the value was already present.
    pub fn insert(&mut self, value: T) -> bool {
        if self.seen.contains(&value) {
            return false;
        }
        self.seen.insert(value.clone());
        self.items.push(value);
        true
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.items.iter()
    }
}

impl<T: Clone + Eq + Hash> Default for OrderedSet<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl OrderedSet<String> {
    pub fn join(&self) -> String {
        self.items.join(LIST_SEPARATOR)
    }
}

/// One organization membership as it appears in an export. Two memberships
/// are the same entry only when all four fields are equal.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct OrganizationEntry {
    pub organization: String,
    pub designation: Option<String>,
    pub team: Option<String>,
    pub department: Option<String>,
}

impl From<&ContactOrganization> for OrganizationEntry {
    fn from(org: &ContactOrganization) -> Self {
        Self {
            organization: org.organization.clone(),
            designation: org.designation.clone(),
            team: org.team.clone(),
            department: org.department.clone(),
        }
    }
}

/// Everything collected for one contact.
#[derive(Debug, Clone)]
pub struct ContactAggregate {
    /// Scalar attributes, taken once per contact.
    pub contact: Contact,
    pub organizations: OrderedSet<OrganizationEntry>,
    pub emails: OrderedSet<String>,
    pub phones: OrderedSet<String>,
    pub websites: OrderedSet<String>,
    pub social_links: OrderedSet<String>,
    pub associated_names: OrderedSet<String>,
}

impl ContactAggregate {
    fn new(contact: Contact) -> Self {
        Self {
            contact,
            organizations: OrderedSet::new(),
            emails: OrderedSet::new(),
            phones: OrderedSet::new(),
            websites: OrderedSet::new(),
            social_links: OrderedSet::new(),
            associated_names: OrderedSet::new(),
        }
    }

    fn for_join_row(row: &ExportJoinRow) -> Self {
        Self::new(Contact {
            id: row.contact_id,
            first_name: row.first_name.clone(),
            last_name: row.last_name.clone(),
            address: row.address.clone(),
            birthday: row.birthday,
            notes: row.notes.clone(),
        })
    }

    fn absorb_join_row(&mut self, row: &ExportJoinRow) {
        if let Some(organization) = &row.organization {
            self.organizations.insert(OrganizationEntry {
                organization: organization.clone(),
                designation: row.designation.clone(),
                team: row.team.clone(),
                department: row.department.clone(),
            });
        }
        if let Some(email) = &row.email {
            self.emails.insert(email.clone());
        }
        if let Some(phone) = &row.phone {
            self.phones.insert(phone_label(phone, row.phone_type));
        }
        if let Some(website) = &row.website {
            self.websites.insert(website.clone());
        }
        if let Some(link) = &row.social_link {
            self.social_links.insert(link.clone());
        }
        if let Some(name) = &row.associated_name {
            self.associated_names.insert(name.clone());
        }
    }

    /// Collapse every collection into a single cell. Organization entries
    /// are split into four parallel lists that stay aligned by position.
    pub fn flatten(&self) -> ExportRow {
        let orgs = &self.organizations;

        ExportRow {
            first_name: self.contact.first_name.clone(),
            last_name: self.contact.last_name.clone(),
            emails: self.emails.join(),
            phones: self.phones.join(),
            organizations: organization_column(orgs, |e| e.organization.as_str()),
            designations: organization_column(orgs, |e| e.designation.as_deref().unwrap_or("")),
            teams: organization_column(orgs, |e| e.team.as_deref().unwrap_or("")),
            departments: organization_column(orgs, |e| e.department.as_deref().unwrap_or("")),
            address: self.contact.address.clone().unwrap_or_default(),
            website: self.websites.join(),
            social_media: self.social_links.join(),
            birthday: self
                .contact
                .birthday
                .map(|d| d.format("%Y-%m-%d").to_string())
                .unwrap_or_default(),
            subordinates: self.associated_names.join(),
            notes: self.contact.notes.clone().unwrap_or_default(),
        }
    }
}

fn organization_column<F>(entries: &OrderedSet<OrganizationEntry>, pick: F) -> String
where
    F: Fn(&OrganizationEntry) -> &str,
{
    entries.iter().map(pick).collect::<Vec<_>>().join(LIST_SEPARATOR)
}

fn phone_label(phone: &str, phone_type: Option<PhoneType>) -> String {
    match phone_type {
        Some(t) => format!("{} ({})", phone, t.display_name()),
        None => phone.to_string(),
    }
}

/// Filter and group join rows. Rows are kept when their membership passes
/// the filter; a contact is present in the output only if at least one of
/// its rows was kept. Output order is the order contacts first appear.
pub fn aggregate_join_rows<I>(rows: I, filter: &ExportFilter) -> Vec<ContactAggregate>
where
    I: IntoIterator<Item = ExportJoinRow>,
{
    let mut aggregates: Vec<ContactAggregate> = Vec::new();
    let mut index: HashMap<Id<Contact>, usize> = HashMap::new();

    for row in rows {
        if !filter.matches(row.organization.as_deref(), row.team.as_deref()) {
            continue;
        }
        let slot = *index.entry(row.contact_id).or_insert_with(|| {
            aggregates.push(ContactAggregate::for_join_row(&row));
            aggregates.len() - 1
        });
        aggregates[slot].absorb_join_row(&row);
    }

    aggregates
}

/// Filter and group contacts fetched per collection. Yields the same
/// aggregates `aggregate_join_rows` would for the equivalent join rows,
/// without materializing the cross product.
pub fn aggregate_details<I>(details: I, filter: &ExportFilter) -> Vec<ContactAggregate>
where
    I: IntoIterator<Item = ContactDetails>,
{
    let mut aggregates = Vec::new();

    for detail in details {
        let memberships: Vec<&ContactOrganization> = if detail.organizations.is_empty() {
            // The join produces a single NULL membership row for this contact.
            if !filter.matches(None, None) {
                continue;
            }
            Vec::new()
        } else {
            let kept: Vec<&ContactOrganization> = detail
                .organizations
                .iter()
                .filter(|o| filter.matches(Some(o.organization.as_str()), o.team.as_deref()))
                .collect();
            if kept.is_empty() {
                continue;
            }
            kept
        };

        let mut aggregate = ContactAggregate::new(detail.contact.clone());
        for org in memberships {
            aggregate.organizations.insert(OrganizationEntry::from(org));
        }
        for email in &detail.emails {
            aggregate.emails.insert(email.email.clone());
        }
        for phone in &detail.phones {
            aggregate.phones.insert(phone_text(phone));
        }
        for url in &detail.urls {
            aggregate.websites.insert(url.url.clone());
        }
        for link in &detail.social_links {
            aggregate.social_links.insert(link.url.clone());
        }
        for name in &detail.associated_names {
            aggregate.associated_names.insert(name.name.clone());
        }
        aggregates.push(aggregate);
    }

    aggregates
}

fn phone_text(phone: &ContactPhone) -> String {
    phone_label(&phone.phone, Some(phone.phone_type))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn join_row(contact: &Contact) -> ExportJoinRow {
        ExportJoinRow {
            contact_id: contact.id,
            first_name: contact.first_name.clone(),
            last_name: contact.last_name.clone(),
            address: None,
            birthday: None,
            notes: None,
            organization: None,
            designation: None,
            team: None,
            department: None,
            email: None,
            phone: None,
            phone_type: None,
            website: None,
            social_link: None,
            associated_name: None,
        }
    }

    #[test]
    fn ordered_set_keeps_first_insertion_order() {
        let mut set = OrderedSet::new();
        assert!(set.insert("b".to_string()));
        assert!(set.insert("a".to_string()));
        assert!(!set.insert("b".to_string()));
        assert_eq!(set.len(), 2);
        assert_eq!(set.join(), "b, a");
    }

    #[test]
    fn cross_product_rows_collapse_to_distinct_values() {
        let jane = Contact::create("Jane".into(), "Doe".into());
        let mut rows = Vec::new();
        for email in ["jane@x.com", "j.doe@y.com"] {
            for phone in ["555-1234", "555-9999", "555-0000"] {
                let mut row = join_row(&jane);
                row.email = Some(email.into());
                row.phone = Some(phone.into());
                row.phone_type = Some(PhoneType::Mobile);
                rows.push(row);
            }
        }
        assert_eq!(rows.len(), 6);

        let aggregates = aggregate_join_rows(rows, &ExportFilter::none());
        assert_eq!(aggregates.len(), 1);
        let flat = aggregates[0].flatten();
        assert_eq!(flat.emails, "jane@x.com, j.doe@y.com");
        assert_eq!(
            flat.phones,
            "555-1234 (Mobile), 555-9999 (Mobile), 555-0000 (Mobile)"
        );
    }

    #[test]
    fn filtered_out_rows_do_not_contribute_memberships() {
        let jane = Contact::create("Jane".into(), "Doe".into());
        let mut acme = join_row(&jane);
        acme.organization = Some("Acme".into());
        acme.team = Some("Eng".into());
        let mut globex = join_row(&jane);
        globex.organization = Some("Globex".into());
        globex.team = Some("Eng".into());

        let filter = ExportFilter::new(Some(["Acme"]), None::<Vec<String>>);
        let aggregates = aggregate_join_rows(vec![acme, globex], &filter);
        assert_eq!(aggregates[0].flatten().organizations, "Acme");
    }

    #[test]
    fn contact_without_memberships_is_dropped_by_active_filter() {
        let jane = Contact::create("Jane".into(), "Doe".into());
        let filter = ExportFilter::new(None::<Vec<String>>, Some(["Eng"]));
        assert!(aggregate_join_rows(vec![join_row(&jane)], &filter).is_empty());
        assert!(aggregate_details(vec![ContactDetails::empty(jane)], &filter).is_empty());
    }

    #[test]
    fn designation_difference_keeps_two_entries() {
        let jane = Contact::create("Jane".into(), "Doe".into());
        let mut lead = join_row(&jane);
        lead.organization = Some("Acme".into());
        lead.designation = Some("Lead".into());
        let mut advisor = lead.clone();
        advisor.designation = Some("Advisor".into());
        let duplicate = lead.clone();

        let aggregates = aggregate_join_rows(vec![lead, advisor, duplicate], &ExportFilter::none());
        let flat = aggregates[0].flatten();
        assert_eq!(flat.organizations, "Acme, Acme");
        assert_eq!(flat.designations, "Lead, Advisor");
        assert_eq!(flat.teams, ", ");
    }

    #[test]
    fn join_row_and_details_carry_same_scalars() {
        let mut jane = Contact::create("Jane".into(), "Doe".into());
        jane.address = Some("1 Main St".into());
        jane.birthday = chrono::NaiveDate::from_ymd_opt(1990, 5, 15);
        jane.notes = Some("met at conf".into());
        let mut row = join_row(&jane);
        row.address = jane.address.clone();
        row.birthday = jane.birthday;
        row.notes = jane.notes.clone();

        let from_join = aggregate_join_rows(vec![row], &ExportFilter::none());
        let from_details = aggregate_details(vec![ContactDetails::empty(jane.clone())], &ExportFilter::none());
        assert_eq!(from_join[0].contact, jane);
        assert_eq!(from_details[0].contact, jane);
        assert_eq!(from_join[0].flatten(), from_details[0].flatten());
        assert_eq!(from_join[0].flatten().birthday, "1990-05-15");
    }

    #[test]
    fn empty_contact_flattens_to_blank_cells() {
        let jane = Contact::create("Jane".into(), "".into());
        let aggregates = aggregate_details(vec![ContactDetails::empty(jane)], &ExportFilter::none());
        let flat = aggregates[0].flatten();
        assert_eq!(flat.first_name, "Jane");
        assert_eq!(flat.emails, "");
        assert_eq!(flat.organizations, "");
        assert_eq!(flat.birthday, "");
    }
}
