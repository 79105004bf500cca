mod mock_provider;
mod scan_flow;
