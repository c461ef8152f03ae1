mod profile_repository_tests;
