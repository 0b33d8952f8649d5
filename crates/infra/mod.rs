pub mod db;
pub mod supabase;
