mod list_logs;
