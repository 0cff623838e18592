pub mod card_scan;
