mod report_queries;
